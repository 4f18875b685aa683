//! A running session: state, input, frame tick and snapshots

pub mod autopilot;
pub mod input;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use input::ControlState;
pub use snapshot::{CooldownView, DropView, GameSnapshot, HeroVitals, RenderEntity, RenderKind};
pub use state::GameState;
pub use tick::Session;
