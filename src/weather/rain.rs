//! Rain particle integrator.
//!
//! A fixed pool of drops falls at a randomized speed each frame. Drops that
//! pass below the ground are put back at the ceiling in the same column;
//! only the initial placement randomizes the horizontal position.

use glam::Vec3;

use crate::weather::config::RainConfig;
use crate::weather::rng::RandomSource;

/// Pool size used by [`crate::weather::WeatherSystem::new`].
pub const DEFAULT_PARTICLES: usize = 1000;
/// Drops are spread over `[-50, 50]` on X and Z.
pub const RAIN_HALF_EXTENT: f32 = 50.0;
/// Slowest fall speed, units per second.
pub const MIN_FALL_SPEED: f32 = 20.0;
/// Random extra fall speed, drawn per drop per frame.
pub const FALL_SPEED_JITTER: f32 = 10.0;

/// Fixed-size pool of rain drop positions.
#[derive(Clone, Debug)]
pub struct RainPool {
    positions: Vec<Vec3>,
    active: bool,
}

impl RainPool {
    /// Scatter `count` drops over the rain area, heights in `[0, ceiling)`.
    pub fn new(count: usize, ceiling: f32, rng: &mut dyn RandomSource) -> Self {
        let positions = (0..count)
            .map(|_| {
                let x = rng.signed(RAIN_HALF_EXTENT);
                let y = rng.range(0.0, ceiling.max(0.0));
                let z = rng.signed(RAIN_HALF_EXTENT);
                Vec3::new(x, y, z)
            })
            .collect();
        Self {
            positions,
            active: false,
        }
    }

    /// Advance all drops by `dt` seconds. Does nothing (and marks the pool
    /// inactive) when the intensity is zero. Returns whether the pool is
    /// active this frame.
    pub fn advance(&mut self, rain: &RainConfig, dt: f32, rng: &mut dyn RandomSource) -> bool {
        self.active = rain.intensity > 0.0;
        if !self.active {
            return false;
        }

        let ceiling = rain.ceiling;
        for p in &mut self.positions {
            let speed = MIN_FALL_SPEED + rng.next_f32() * FALL_SPEED_JITTER;
            p.y -= speed * dt;
            if p.y < 0.0 {
                p.y = ceiling;
            } else if p.y > ceiling {
                // Ceiling was lowered since this drop was placed
                p.y = ceiling;
            }
        }
        true
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as raw bytes for a vertex buffer upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions.as_slice())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether the last advance ran.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::rng::{ScriptedRng, SimRng};

    fn rain(intensity: f32, ceiling: f32) -> RainConfig {
        RainConfig { intensity, ceiling }
    }

    #[test]
    fn test_initial_scatter() {
        let pool = RainPool::new(DEFAULT_PARTICLES, 50.0, &mut SimRng::default());
        assert_eq!(pool.len(), DEFAULT_PARTICLES);
        for p in pool.positions() {
            assert!(p.x.abs() <= RAIN_HALF_EXTENT && p.z.abs() <= RAIN_HALF_EXTENT);
            assert!((0.0..50.0).contains(&p.y));
        }
        assert!(!pool.is_active());
    }

    #[test]
    fn test_fall_speed_range() {
        let mut pool = RainPool::new(2, 50.0, &mut ScriptedRng::constant(0.9));
        let start = pool.positions()[0].y;

        pool.advance(&rain(1.0, 50.0), 0.1, &mut ScriptedRng::constant(0.0));
        assert!((pool.positions()[0].y - (start - 2.0)).abs() < 1e-4);

        let start = pool.positions()[1].y;
        pool.advance(&rain(1.0, 50.0), 0.1, &mut ScriptedRng::constant(0.5));
        assert!((pool.positions()[1].y - (start - 2.5)).abs() < 1e-4);
    }

    #[test]
    fn test_recycle_keeps_column() {
        let mut pool = RainPool::new(1, 1.0, &mut ScriptedRng::constant(0.25));
        let before = pool.positions()[0];
        assert!((before.y - 0.25).abs() < 1e-6);

        // Falls at least 2 units in 0.1 s, so it crosses the ground
        assert!(pool.advance(&rain(0.5, 40.0), 0.1, &mut SimRng::default()));
        let after = pool.positions()[0];
        assert_eq!(after.y, 40.0);
        assert_eq!(after.x, before.x);
        assert_eq!(after.z, before.z);
    }

    #[test]
    fn test_heights_stay_in_range() {
        let mut rng = SimRng::from_seed_u64(5);
        let mut pool = RainPool::new(DEFAULT_PARTICLES, 60.0, &mut rng);
        let cfg = rain(0.8, 60.0);
        for frame in 0..500 {
            let dt = if frame % 97 == 0 { 3.0 } else { 1.0 / 60.0 };
            pool.advance(&cfg, dt, &mut rng);
            for p in pool.positions() {
                assert!((0.0..=60.0).contains(&p.y), "height {} out of range", p.y);
            }
        }
        assert_eq!(pool.len(), DEFAULT_PARTICLES);
    }

    #[test]
    fn test_lowered_ceiling_clamps() {
        let mut rng = SimRng::from_seed_u64(8);
        let mut pool = RainPool::new(200, 100.0, &mut rng);
        pool.advance(&rain(1.0, 10.0), 0.0, &mut rng);
        assert!(pool.positions().iter().all(|p| p.y <= 10.0 && p.y >= 0.0));
    }

    #[test]
    fn test_zero_intensity_is_noop() {
        let mut rng = SimRng::default();
        let mut pool = RainPool::new(100, 50.0, &mut rng);
        let before = pool.positions().to_vec();

        let mut counting = ScriptedRng::constant(0.5);
        assert!(!pool.advance(&rain(0.0, 50.0), 0.5, &mut counting));
        assert_eq!(pool.positions(), before.as_slice());
        assert_eq!(counting.draws, 0);
        assert!(!pool.is_active());
    }

    #[test]
    fn test_byte_view() {
        let pool = RainPool::new(10, 50.0, &mut SimRng::default());
        assert_eq!(pool.as_bytes().len(), 10 * 12);
    }
}
