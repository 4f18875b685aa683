//! Async client for the remote image generation service
//!
//! Speaks the OpenAI-compatible `images/generations` format: POST
//! `{model, prompt, size}` with a bearer credential, read a base64 PNG back
//! from `data[0].b64_json`.

use crate::core::config::ImageGenConfig;
use crate::core::error::{GameError, Result};
use crate::imagegen::icon::Icon;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Error bodies are cut to this many characters before being reported
pub const ERROR_BODY_LIMIT: usize = 120;

/// Anything that can turn a prompt into an icon
///
/// The pipeline worker is generic over this so tests can substitute an
/// in-process service.
pub trait RemoteImageService: Send + Sync + 'static {
    fn generate(&self, api_key: &str, prompt: &str) -> impl Future<Output = Result<Icon>> + Send;
}

/// HTTP client for an OpenAI-compatible image endpoint
pub struct OpenAiImageClient {
    client: Client,
    api_url: String,
    model: String,
    size: String,
}

impl OpenAiImageClient {
    pub fn new(api_url: String, model: String, size: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            model,
            size,
        }
    }

    pub fn from_config(config: &ImageGenConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            config.model.clone(),
            config.size.clone(),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn request(&self, api_key: &str, prompt: &str) -> Result<Icon> {
        let request = ImageRequest {
            model: &self.model,
            prompt,
            size: &self.size,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::ImageService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GameError::ImageService(format!(
                "HTTP {} {}",
                status.as_u16(),
                truncate_message(&error_text, ERROR_BODY_LIMIT)
            )));
        }

        let body: ImageResponse = response
            .json()
            .await
            .map_err(|e| GameError::ImageService(e.to_string()))?;

        let b64 = body
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .filter(|b64| !b64.is_empty())
            .ok_or(GameError::MissingPayload)?;

        Icon::decode_base64(&b64)
    }
}

impl RemoteImageService for OpenAiImageClient {
    fn generate(&self, api_key: &str, prompt: &str) -> impl Future<Output = Result<Icon>> + Send {
        self.request(api_key, prompt)
    }
}

/// First `limit` characters of `text`, respecting char boundaries
pub fn truncate_message(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    b64_json: Option<String>,
}
