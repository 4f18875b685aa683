//! Abilities, projectiles and area effects

pub mod abilities;
pub mod area;
pub mod constants;
pub mod projectile;

pub use abilities::{try_cast, AbilityKind, AbilitySpec, Cooldowns};
pub use area::{resolve_areas, AreaEffect, AreaKind};
pub use projectile::{resolve_projectiles, Projectile, ProjectileKind};
