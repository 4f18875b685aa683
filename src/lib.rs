//! Fallen Cathedral - arena action combat with loot and generated item art

pub mod combat;
pub mod core;
pub mod director;
pub mod entity;
pub mod imagegen;
pub mod loot;
pub mod session;
