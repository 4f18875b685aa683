//! The icon pipeline worker
//!
//! One tokio task owns the cache and drains a FIFO command channel, so at
//! most one remote request is ever in flight. Results and status lines go
//! back over an event channel that the session drains once per tick.

use crate::core::config::ImageGenConfig;
use crate::core::error::GameError;
use crate::core::types::{Color, DropId};
use crate::imagegen::cache::IconCache;
use crate::imagegen::client::RemoteImageService;
use crate::imagegen::icon::{Icon, IconRequest, Provenance};
use crate::imagegen::local::render_local_icon;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

pub const STATUS_IDLE: Color = Color::rgb(0xa0d2ff);
pub const STATUS_WORKING: Color = Color::rgb(0xffd79e);
pub const STATUS_OK: Color = Color::rgb(0x9ee6a0);
pub const STATUS_LOCAL: Color = Color::rgb(0xc7d5e8);
pub const STATUS_FAILED: Color = Color::rgb(0xffb5a3);

/// Requests sent from the session to the worker
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineCommand {
    Generate(IconRequest),
    SetRemoteEnabled(bool),
    SetApiKey(Option<String>),
}

/// One line of generator status for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub message: String,
    pub color: Color,
}

impl StatusLine {
    pub fn new(message: impl Into<String>, color: Color) -> Self {
        Self {
            message: message.into(),
            color,
        }
    }

    pub fn idle() -> Self {
        Self::new("Local icon generator ready.", STATUS_IDLE)
    }
}

/// Reports sent from the worker back to the session
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Resolved {
        drop_id: DropId,
        icon: Icon,
        provenance: Provenance,
    },
    Status(StatusLine),
}

/// Sending half of the command channel
///
/// Sends never block and never need a runtime, so the simulation can enqueue
/// from inside a tick.
#[derive(Debug, Clone)]
pub struct IconQueue {
    tx: UnboundedSender<PipelineCommand>,
}

impl IconQueue {
    /// Queue an icon job; false if the worker has shut down
    pub fn enqueue(&self, request: IconRequest) -> bool {
        self.send(PipelineCommand::Generate(request))
    }

    pub fn set_remote_enabled(&self, enabled: bool) -> bool {
        self.send(PipelineCommand::SetRemoteEnabled(enabled))
    }

    pub fn set_api_key(&self, api_key: Option<String>) -> bool {
        self.send(PipelineCommand::SetApiKey(api_key))
    }

    fn send(&self, command: PipelineCommand) -> bool {
        match self.tx.send(command) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!("Icon pipeline is closed, dropping command");
                false
            }
        }
    }
}

/// A connected command channel with no worker attached yet
pub fn channel() -> (IconQueue, UnboundedReceiver<PipelineCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IconQueue { tx }, rx)
}

pub struct IconWorker<S> {
    service: S,
    cache: IconCache,
    remote_enabled: bool,
    api_key: Option<String>,
    timeout: Duration,
    commands: UnboundedReceiver<PipelineCommand>,
    events: UnboundedSender<PipelineEvent>,
}

impl<S: RemoteImageService> IconWorker<S> {
    pub fn new(
        config: &ImageGenConfig,
        service: S,
        commands: UnboundedReceiver<PipelineCommand>,
        events: UnboundedSender<PipelineEvent>,
    ) -> Self {
        Self {
            service,
            cache: IconCache::new(),
            remote_enabled: config.remote_enabled,
            api_key: config.resolved_api_key(),
            timeout: config.timeout(),
            commands,
            events,
        }
    }

    /// Process commands until every `IconQueue` is dropped
    pub async fn run(mut self) {
        tracing::info!(
            remote = self.remote_active(),
            timeout = ?self.timeout,
            "Icon pipeline started"
        );
        while let Some(command) = self.commands.recv().await {
            self.handle(command).await;
        }
        tracing::info!(cached = self.cache.len(), "Icon pipeline stopped");
    }

    async fn handle(&mut self, command: PipelineCommand) {
        match command {
            PipelineCommand::Generate(request) => {
                let (icon, provenance) = self.process(&request).await;
                self.emit(PipelineEvent::Resolved {
                    drop_id: request.drop_id,
                    icon,
                    provenance,
                });
            }
            PipelineCommand::SetRemoteEnabled(enabled) => {
                self.remote_enabled = enabled;
                let status = if enabled {
                    StatusLine::new(
                        "Remote image mode enabled. New loot will request generated art.",
                        STATUS_OK,
                    )
                } else {
                    StatusLine::new(
                        "Remote image mode disabled. Using local icon generator.",
                        STATUS_LOCAL,
                    )
                };
                self.emit(PipelineEvent::Status(status));
            }
            PipelineCommand::SetApiKey(api_key) => {
                self.api_key = api_key
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty());
                if self.api_key.is_none() {
                    self.emit(PipelineEvent::Status(StatusLine::new(
                        "No API key set. Local generation remains active.",
                        STATUS_WORKING,
                    )));
                }
                tracing::debug!(has_key = self.api_key.is_some(), "Image API key updated");
            }
        }
    }

    /// Resolve one request: cache, then remote, then local
    ///
    /// Always produces an icon; remote failures fall back to the local
    /// renderer and are reported as a status line.
    pub async fn process(&mut self, request: &IconRequest) -> (Icon, Provenance) {
        let key = request.key();
        if let Some(icon) = self.cache.get(&key) {
            tracing::debug!(item = %key, "Icon cache hit");
            return (icon, Provenance::Cache);
        }

        let (icon, provenance) = match self.api_key.clone().filter(|_| self.remote_enabled) {
            Some(api_key) => {
                self.status(
                    format!("Generating {} via remote image service...", request.name),
                    STATUS_WORKING,
                );
                match self.fetch_remote(&api_key, &request.prompt()).await {
                    Ok(icon) => {
                        self.status(format!("Generated art for {}.", request.name), STATUS_OK);
                        tracing::info!(item = %key, "Remote icon generated");
                        (icon, Provenance::Remote)
                    }
                    Err(err) => {
                        tracing::warn!(
                            item = %key,
                            error = %err,
                            "Remote icon failed, using fallback"
                        );
                        self.status(
                            format!("Remote image failed: {}. Using fallback icon.", err),
                            STATUS_FAILED,
                        );
                        let icon = render_local_icon(&request.name, request.tier);
                        (icon, Provenance::Fallback)
                    }
                }
            }
            None => {
                self.status(
                    "Using local icon generator (enable remote mode to use the image service).",
                    STATUS_LOCAL,
                );
                (render_local_icon(&request.name, request.tier), Provenance::Local)
            }
        };

        self.cache.insert(key, icon.clone());
        (icon, provenance)
    }

    async fn fetch_remote(&self, api_key: &str, prompt: &str) -> crate::core::error::Result<Icon> {
        let icon = tokio::time::timeout(self.timeout, self.service.generate(api_key, prompt))
            .await
            .map_err(|_| GameError::ImageTimeout(self.timeout))??;
        if icon.is_empty() {
            return Err(GameError::MissingPayload);
        }
        Ok(icon)
    }

    pub fn cache(&self) -> &IconCache {
        &self.cache
    }

    fn remote_active(&self) -> bool {
        self.remote_enabled && self.api_key.is_some()
    }

    fn status(&self, message: impl Into<String>, color: Color) {
        self.emit(PipelineEvent::Status(StatusLine::new(message, color)));
    }

    fn emit(&self, event: PipelineEvent) {
        // The session may already be gone during shutdown
        let _ = self.events.send(event);
    }
}

/// Spawn the worker on the current tokio runtime
pub fn spawn_pipeline<S: RemoteImageService>(
    config: &ImageGenConfig,
    service: S,
) -> (IconQueue, UnboundedReceiver<PipelineEvent>, JoinHandle<()>) {
    let (queue, commands) = channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let worker = IconWorker::new(config, service, commands, events_tx);
    let handle = tokio::spawn(worker.run());
    (queue, events_rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::loot::table::ItemTier;
    use std::future::Future;

    struct Unreachable;

    impl RemoteImageService for Unreachable {
        fn generate(
            &self,
            _api_key: &str,
            _prompt: &str,
        ) -> impl Future<Output = Result<Icon>> + Send {
            async { Err(GameError::ImageService("unreachable".into())) }
        }
    }

    fn request(name: &str) -> IconRequest {
        IconRequest {
            drop_id: DropId::new(),
            tier: ItemTier::Magic,
            name: name.into(),
        }
    }

    fn worker(
        config: &ImageGenConfig,
    ) -> (IconWorker<Unreachable>, UnboundedReceiver<PipelineEvent>) {
        let (_queue, commands) = channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let worker = IconWorker::new(config, Unreachable, commands, events_tx);
        (worker, events_rx)
    }

    #[tokio::test]
    async fn test_local_mode_then_cache() {
        let (mut worker, mut events) = worker(&ImageGenConfig::default());

        let (_, provenance) = worker.process(&request("Crude Hatchet")).await;
        assert_eq!(provenance, Provenance::Local);
        let (_, provenance) = worker.process(&request("Crude Hatchet")).await;
        assert_eq!(provenance, Provenance::Cache);
        assert_eq!(worker.cache().len(), 1);

        // Only the first resolution posts a status line
        assert!(matches!(events.try_recv(), Ok(PipelineEvent::Status(_))));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remote_without_key_stays_local() {
        let config = ImageGenConfig {
            remote_enabled: true,
            api_key: None,
            api_key_env: "FALLEN_CATHEDRAL_TEST_UNSET_KEY".into(),
            ..ImageGenConfig::default()
        };
        let (mut worker, _events) = worker(&config);
        let (_, provenance) = worker.process(&request("Cathedral Seal")).await;
        assert_eq!(provenance, Provenance::Local);
    }

    #[tokio::test]
    async fn test_failure_falls_back_and_reports() {
        let config = ImageGenConfig {
            remote_enabled: true,
            api_key: Some("sk-test".into()),
            ..ImageGenConfig::default()
        };
        let (mut worker, mut events) = worker(&config);
        let (icon, provenance) = worker.process(&request("Cathedral Seal")).await;
        assert_eq!(provenance, Provenance::Fallback);
        assert_eq!(icon, render_local_icon("Cathedral Seal", ItemTier::Magic));

        let mut last = None;
        while let Ok(PipelineEvent::Status(line)) = events.try_recv() {
            last = Some(line);
        }
        let last = last.expect("status line");
        assert_eq!(last.color, STATUS_FAILED);
        assert!(last.message.contains("unreachable"));
    }

    #[tokio::test]
    async fn test_blank_key_clears_credential() {
        let config = ImageGenConfig {
            remote_enabled: true,
            api_key: Some("sk-test".into()),
            ..ImageGenConfig::default()
        };
        let (mut worker, mut events) = worker(&config);
        worker.handle(PipelineCommand::SetApiKey(Some("   ".into()))).await;
        assert!(!worker.remote_active());
        match events.try_recv() {
            Ok(PipelineEvent::Status(line)) => assert!(line.message.starts_with("No API key set")),
            other => panic!("expected status, got {:?}", other),
        }
    }

    #[test]
    fn test_enqueue_after_close_reports_false() {
        let (queue, commands) = channel();
        drop(commands);
        assert!(!queue.enqueue(request("Crude Hatchet")));
    }
}
