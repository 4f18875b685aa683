//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use glam::Vec2;

/// Unique identifier for a dropped item
///
/// Used to route resolved icons from the image pipeline back to the drop
/// that requested them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropId(pub Uuid);

impl DropId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DropId {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequential identifier for spawned enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// An sRGB color, stored as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// CSS-style `#rrggbb` string
    pub fn hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// Frame-rate independent exponential approach from `current` toward `target`
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    current + (target - current) * (1.0 - (-lambda * dt).exp())
}
