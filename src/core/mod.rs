pub mod config;
pub mod error;
pub mod log;
pub mod rng;
pub mod types;

pub use config::{ImageGenConfig, SessionConfig};
pub use error::{GameError, Result};
pub use log::{CombatLog, LogEntry};
pub use rng::GameRng;
