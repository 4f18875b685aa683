//! Scripted input for headless runs

use crate::core::types::Vec2;
use crate::session::input::ControlState;
use crate::session::state::GameState;

/// Simple kiting behaviour: shoot the nearest enemy, lance into clusters,
/// whirl when surrounded, back off from contact and sweep up gold
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Hold fire while the nearest enemy is within this distance
    pub engage_range: f32,
    /// Retreat when an enemy is closer than this
    pub retreat_range: f32,
    /// Radius around the target counted as one cluster
    pub cluster_radius: f32,
    /// Cluster size that triggers a lance
    pub cluster_size: usize,
    /// Radius around the hero checked before a whirl
    pub crowd_radius: f32,
    /// Enemies inside `crowd_radius` that trigger a whirl
    pub crowd_size: usize,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            engage_range: 22.0,
            retreat_range: 3.0,
            cluster_radius: 4.0,
            cluster_size: 2,
            crowd_radius: 4.5,
            crowd_size: 3,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `controls` for the next tick from the current state
    pub fn steer(&self, state: &GameState, controls: &mut ControlState) {
        let hero = state.hero.position;
        let alive: Vec<Vec2> = state
            .enemies
            .iter()
            .filter(|e| !e.dead)
            .map(|e| e.position)
            .collect();

        let nearest = closest(alive.iter().copied(), hero);

        controls.fire = false;
        controls.spirit = false;
        controls.move_axis = Vec2::ZERO;

        let Some(target) = nearest else {
            controls.aim = hero + Vec2::Y;
            controls.move_axis = self.toward_nearest_orb(state);
            return;
        };

        controls.aim = target;
        let distance = target.distance(hero);
        controls.fire = distance < self.engage_range;

        let cluster = alive
            .iter()
            .filter(|p| p.distance(target) < self.cluster_radius)
            .count();
        controls.spirit = controls.fire && cluster >= self.cluster_size;

        let crowd = alive
            .iter()
            .filter(|p| p.distance(hero) < self.crowd_radius)
            .count();
        if crowd >= self.crowd_size {
            controls.press_whirl();
        }

        controls.move_axis = if distance < self.retreat_range {
            (hero - target).normalize_or_zero()
        } else {
            self.toward_nearest_orb(state)
        };
    }

    fn toward_nearest_orb(&self, state: &GameState) -> Vec2 {
        let hero = state.hero.position;
        closest(state.orbs.iter().map(|orb| orb.position), hero)
            .map(|orb| (orb - hero).normalize_or_zero())
            .unwrap_or(Vec2::ZERO)
    }
}

fn closest(points: impl Iterator<Item = Vec2>, to: Vec2) -> Option<Vec2> {
    let key = |p: &Vec2| p.distance_squared(to);
    points.min_by(|a, b| key(a).total_cmp(&key(b)))
}
