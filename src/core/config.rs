//! Session configuration with documented defaults
//!
//! Tuning that a player or test harness may want to change lives here and can
//! be loaded from TOML. Fixed combat numbers (ability stats, enemy tables)
//! stay in `combat::constants` and the entity modules.

use crate::core::error::{GameError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration for a single play session
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for the session RNG
    ///
    /// `None` seeds from entropy. A seed makes spawns, drops and gold rolls
    /// repeatable, which tests and the headless runner rely on.
    pub seed: Option<u64>,

    /// Largest simulated step per frame, in seconds
    ///
    /// Frame hitches longer than this are truncated so movement and
    /// damage-over-time integration stay bounded.
    pub max_step: f32,

    /// Number of combat log lines kept for display
    pub combat_log_capacity: usize,

    /// Number of recent drops kept for the drop gallery
    ///
    /// Oldest drops are evicted first once the list is full.
    pub recent_drops_capacity: usize,

    /// Probability that a killed enemy drops an item
    pub drop_chance: f32,

    /// Kill totals that end waves 1..=N
    ///
    /// Must be strictly increasing.
    pub kill_milestones: Vec<u32>,

    /// Kill threshold per wave number once the milestone list runs out
    ///
    /// Wave `w` past the schedule ends at `w * kills_per_late_wave` kills.
    pub kills_per_late_wave: u32,

    /// Item icon generation settings
    pub images: ImageGenConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_step: 0.04,
            combat_log_capacity: 8,
            recent_drops_capacity: 6,
            drop_chance: 0.42,
            kill_milestones: vec![12, 30, 54, 80],
            kills_per_late_wave: 35,
            images: ImageGenConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.max_step > 0.0 && self.max_step <= 1.0) {
            return Err(GameError::Config(format!(
                "max_step ({}) must be in (0, 1]",
                self.max_step
            )));
        }

        if self.combat_log_capacity == 0 || self.recent_drops_capacity == 0 {
            return Err(GameError::Config(
                "combat_log_capacity and recent_drops_capacity must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.drop_chance) {
            return Err(GameError::Config(format!(
                "drop_chance ({}) must be within [0, 1]",
                self.drop_chance
            )));
        }

        if self.kill_milestones.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GameError::Config(format!(
                "kill_milestones {:?} must be strictly increasing",
                self.kill_milestones
            )));
        }

        if self.kills_per_late_wave == 0 {
            return Err(GameError::Config(
                "kills_per_late_wave must be positive".into(),
            ));
        }

        self.images.validate()
    }
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest accepted remote call bound, in seconds
pub const MAX_TIMEOUT_SECS: f32 = 3600.0;

/// Settings for the item icon pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageGenConfig {
    /// Request icons from the remote image service
    ///
    /// Only takes effect when a credential is also available. Otherwise every
    /// icon comes from the local renderer.
    pub remote_enabled: bool,

    /// Credential for the remote service
    ///
    /// Takes precedence over `api_key_env`.
    pub api_key: Option<String>,

    /// Environment variable consulted when `api_key` is unset
    pub api_key_env: String,

    /// Image generation endpoint
    pub api_url: String,

    pub model: String,

    /// Requested image size, e.g. `512x512`
    pub size: String,

    /// Upper bound on a single remote call, in seconds
    ///
    /// A call that has not completed by then is abandoned and the local
    /// fallback icon is used instead. The pipeline is serialized, so without
    /// this bound a hung request would stall every later icon.
    pub timeout_secs: f32,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            remote_enabled: false,
            api_key: None,
            api_key_env: "OPENAI_API_KEY".into(),
            api_url: "https://api.openai.com/v1/images/generations".into(),
            model: "gpt-image-1".into(),
            size: "512x512".into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS as f32,
        }
    }
}

impl ImageGenConfig {
    /// The configured credential, falling back to the environment
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// The remote call bound, clamped to [`MAX_TIMEOUT_SECS`]
    ///
    /// Non-positive or NaN values fall back to the default bound.
    pub fn timeout(&self) -> Duration {
        let fallback = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        if self.timeout_secs.is_nan() || self.timeout_secs <= 0.0 {
            return fallback;
        }
        Duration::try_from_secs_f32(self.timeout_secs.min(MAX_TIMEOUT_SECS))
            .unwrap_or(fallback)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.timeout_secs > 0.0 && self.timeout_secs <= MAX_TIMEOUT_SECS) {
            return Err(GameError::Config(format!(
                "images.timeout_secs ({}) must be in (0, {}]",
                self.timeout_secs, MAX_TIMEOUT_SECS
            )));
        }
        if self.api_url.is_empty() {
            return Err(GameError::Config("images.api_url must not be empty".into()));
        }
        Ok(())
    }
}
