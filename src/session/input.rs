//! Per-frame player input

use crate::combat::abilities::AbilityKind;
use crate::core::types::Vec2;

/// Input consumed by one tick
///
/// `fire` and `spirit` are held buttons. `whirl` is a latched edge: set it
/// when the key goes down and the tick clears it after the hero update,
/// whether or not the whirl actually fired.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlState {
    /// Raw strafe (x) and forward (y) axes, each in `[-1, 1]`
    pub move_axis: Vec2,
    /// World-space point the hero is aiming at
    pub aim: Vec2,
    pub fire: bool,
    pub spirit: bool,
    pub whirl: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a whirl request for the next tick
    pub fn press_whirl(&mut self) {
        self.whirl = true;
    }

    pub fn wants(&self, kind: AbilityKind) -> bool {
        match kind {
            AbilityKind::FireBolt => self.fire,
            AbilityKind::SpiritLance => self.spirit,
            AbilityKind::Whirl => self.whirl,
        }
    }

    /// Build the movement axis from four directional keys
    pub fn set_keys(&mut self, up: bool, down: bool, left: bool, right: bool) {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        self.move_axis = Vec2::new(axis(left, right), axis(down, up));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_cancel_out() {
        let mut controls = ControlState::new();
        controls.set_keys(true, true, false, true);
        assert_eq!(controls.move_axis, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_wants_maps_buttons() {
        let mut controls = ControlState {
            fire: true,
            ..ControlState::default()
        };
        assert!(controls.wants(AbilityKind::FireBolt));
        assert!(!controls.wants(AbilityKind::Whirl));
        controls.press_whirl();
        assert!(controls.wants(AbilityKind::Whirl));
    }
}
