//! Wind integrator.
//!
//! The cloud group is turned around the vertical axis by the x-component of
//! the wind heading only. The full heading is still integrated into a
//! translational drift that renderers may use (rain slant, fog scroll), but
//! it never feeds the rotation.

use glam::Vec3;

use crate::weather::config::WindConfig;

/// Rotation rate per unit of wind speed, in radians per second.
pub const ROTATION_RATE: f32 = 0.1;

/// Runtime wind state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindState {
    /// Rotation of the cloud group around +Y, radians. Unbounded.
    pub orientation: f32,
    /// Unit heading on the XZ plane.
    pub direction: Vec3,
    /// Integral of `direction * speed * dt`.
    pub drift: Vec3,
}

impl WindState {
    /// Advance by `dt` seconds.
    pub fn integrate(&mut self, config: &WindConfig, dt: f32) {
        let angle = config.angle_degrees.to_radians();
        let (sin, cos) = angle.sin_cos();

        self.orientation += rotation_delta(cos, config.speed, dt);
        self.direction = Vec3::new(cos, 0.0, sin);
        self.drift += self.direction * config.speed * dt;
    }
}

#[inline]
fn rotation_delta(cos_heading: f32, speed: f32, dt: f32) -> f32 {
    cos_heading * speed * dt * ROTATION_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wind(speed: f32, angle_degrees: f32) -> WindConfig {
        WindConfig { speed, angle_degrees }
    }

    #[test]
    fn test_heading_zero_rotates_at_full_rate() {
        let mut w = WindState::default();
        w.integrate(&wind(0.5, 0.0), 2.0);
        assert!((w.orientation - 0.1).abs() < 1e-6);
        assert!((w.drift.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_crosswind_does_not_rotate() {
        let mut w = WindState::default();
        w.integrate(&wind(1.0, 90.0), 1.0);
        assert!(w.orientation.abs() < 1e-6);
        // Drift still follows the heading
        assert!((w.drift.z - 1.0).abs() < 1e-6);
        assert!(w.drift.x.abs() < 1e-6);
    }

    #[test]
    fn test_headwind_rotates_backwards() {
        let mut w = WindState::default();
        w.integrate(&wind(1.0, 180.0), 1.0);
        assert!((w.orientation + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_non_decreasing_for_forward_headings() {
        let mut w = WindState::default();
        let mut last = w.orientation;
        for (i, angle) in [0.0, 30.0, 89.0, 271.0, 300.0, 360.0].iter().enumerate() {
            for step in 0..50 {
                let dt = (i * 50 + step) as f32 * 0.001;
                w.integrate(&wind(0.7, *angle), dt);
                assert!(w.orientation >= last, "angle {angle} decreased orientation");
                last = w.orientation;
            }
        }
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut w = WindState::default();
        w.integrate(&wind(1.0, 45.0), 0.0);
        assert_eq!(w.orientation, 0.0);
        assert_eq!(w.drift, Vec3::ZERO);
    }
}
