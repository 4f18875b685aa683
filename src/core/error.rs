use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Image service error: {0}")]
    ImageService(String),

    #[error("Image service timed out after {0:?}")]
    ImageTimeout(Duration),

    #[error("Missing image payload")]
    MissingPayload,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Payload decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
