//! Spawn pacing and wave progression

pub mod spawn;
pub mod wave;

pub use spawn::{population_cap, spawn_cooldown, SpawnDirector};
pub use wave::{objective_text, WaveSchedule};
