//! Bounded random helpers shared by every subsystem
//!
//! All randomness in a session flows through one [`GameRng`] owned by the
//! session, so a seed pins down spawns, drops and gold rolls for tests and
//! headless runs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;

pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform in `[0, 1)`
    pub fn roll(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Uniform in `[min, max)`; returns `min` for an empty range
    pub fn rand_float(&mut self, min: f32, max: f32) -> f32 {
        min + self.roll() * (max - min)
    }

    /// Uniform integer in `[min, max]` inclusive; returns `min` when `max < min`
    pub fn rand_int(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    /// Uniform angle in `[0, 2π)`
    pub fn angle(&mut self) -> f32 {
        self.roll() * TAU
    }

    /// Random point on an annulus around the origin
    pub fn point_in_ring(&mut self, min_distance: f32, max_distance: f32) -> Vec2 {
        let distance = self.rand_float(min_distance, max_distance);
        let angle = self.angle();
        Vec2::new(angle.cos() * distance, angle.sin() * distance)
    }

    /// Pick one element uniformly; `None` for an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rand_int(0, items.len() as u32 - 1) as usize;
        items.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = GameRng::from_seed(7);
        let mut b = GameRng::from_seed(7);
        for _ in 0..32 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_rand_int_inclusive_bounds() {
        let mut rng = GameRng::from_seed(1);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let v = rng.rand_int(4, 6);
            assert!((4..=6).contains(&v));
            seen_min |= v == 4;
            seen_max |= v == 6;
        }
        assert!(seen_min && seen_max);
        assert_eq!(rng.rand_int(9, 3), 9);
    }

    #[test]
    fn test_point_in_ring_distance() {
        let mut rng = GameRng::from_seed(3);
        for _ in 0..100 {
            let p = rng.point_in_ring(18.0, 35.0);
            let d = p.length();
            assert!(d >= 17.99 && d <= 35.01, "distance {} out of ring", d);
        }
    }

    #[test]
    fn test_pick_empty() {
        let mut rng = GameRng::from_seed(3);
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
        assert_eq!(rng.pick(&[5]), Some(&5));
    }
}
