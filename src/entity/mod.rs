//! Hero and enemy models

pub mod enemy;
pub mod hero;

pub use enemy::{Enemy, EnemyDeath, EnemyKind, EnemyProfile};
pub use hero::Hero;
