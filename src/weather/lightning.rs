//! Lightning strike state machine.
//!
//! Evaluated once per frame. While the storm is on, each frame draws a
//! sample against a frequency-dependent threshold; a hit starts a new strike
//! (replacing any fading one), otherwise the light and the current strike
//! decay by fixed steps. Turning the storm off clears everything at once.

use glam::Vec3;

use crate::weather::config::StormConfig;
use crate::weather::glow::{GlowTexture, glow_texture};
use crate::weather::rng::RandomSource;

/// Threshold at frequency 0. A sample above the threshold triggers a strike.
pub const BASE_THRESHOLD: f32 = 0.995;
/// How far frequency 1 lowers the threshold.
pub const FREQUENCY_SPAN: f32 = 0.05;
/// Random extra light intensity on top of the configured base.
pub const INTENSITY_JITTER: f32 = 200.0;
/// Strikes land in `[-50, 50]` on X and Z.
pub const STRIKE_HALF_EXTENT: f32 = 50.0;
/// Light intensity lost per non-striking frame.
pub const LIGHT_DECAY: f32 = 20.0;
/// Strike alpha lost per non-striking frame.
pub const ALPHA_DECAY: f32 = 0.1;
/// The bolt starts this far above the strike point.
pub const BOLT_RISE: f32 = 30.0;
/// Line segments per bolt.
pub const BOLT_SEGMENTS: usize = 8;
/// Max horizontal offset of the bolt's ground point from the strike.
pub const GROUND_JITTER: f32 = 5.0;
/// Max horizontal offset of interior bolt vertices from the straight path.
pub const SEGMENT_JITTER: f32 = 3.0;

// Ten 0.1 steps from 1.0 do not land exactly on 0.0 in f32.
const ALPHA_EPSILON: f32 = 1e-4;

/// Per-frame trigger threshold for a frequency in `[0, 1]`.
#[inline]
pub fn strike_threshold(frequency: f32) -> f32 {
    BASE_THRESHOLD - frequency * FREQUENCY_SPAN
}

/// Where the state machine is after a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightningPhase {
    /// Storm off, nothing visible.
    #[default]
    Idle,
    /// Storm on, no strike alive.
    Armed,
    /// A strike started this frame.
    Striking,
    /// A strike is fading out.
    Fading,
}

/// The active strike.
#[derive(Clone, Debug, PartialEq)]
pub struct Strike {
    /// Flash center.
    pub position: Vec3,
    /// Visibility in `[0, 1]`.
    pub alpha: f32,
    /// Jagged polyline from above the flash down to the ground.
    pub bolt: Vec<Vec3>,
}

/// Glow sprite drawn at the strike.
#[derive(Clone, Copy, Debug)]
pub struct GlowSprite {
    pub center: Vec3,
    pub opacity: f32,
    pub color: [f32; 3],
    pub texture: &'static GlowTexture,
}

/// The storm point light.
#[derive(Clone, Debug, PartialEq)]
pub struct LightState {
    /// Never negative.
    pub intensity: f32,
    pub position: Vec3,
    pub color: [f32; 3],
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            position: Vec3::ZERO,
            color: StormConfig::default().color,
        }
    }
}

/// Lightning state machine.
#[derive(Debug, Default)]
pub struct Lightning {
    phase: LightningPhase,
    strike: Option<Strike>,
    light: LightState,
    strike_count: u64,
}

impl Lightning {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame. `base_height` is the cloud layer altitude.
    pub fn step(
        &mut self,
        storm: &StormConfig,
        base_height: f32,
        rng: &mut dyn RandomSource,
    ) -> LightningPhase {
        if !storm.enabled {
            self.strike = None;
            self.light.intensity = 0.0;
            self.phase = LightningPhase::Idle;
            return self.phase;
        }

        self.light.color = storm.color;
        let r = rng.next_f32();
        if r > strike_threshold(storm.frequency) {
            self.trigger(storm, base_height, rng);
        } else {
            self.decay();
        }
        self.phase
    }

    fn trigger(&mut self, storm: &StormConfig, base_height: f32, rng: &mut dyn RandomSource) {
        let intensity = storm.intensity + rng.next_f32() * INTENSITY_JITTER;
        let x = rng.signed(STRIKE_HALF_EXTENT);
        let z = rng.signed(STRIKE_HALF_EXTENT);
        let y = base_height + storm.height_offset + (rng.next_f32() - 0.5) * storm.height_variance;
        let position = Vec3::new(x, y, z);

        self.light.intensity = intensity.max(0.0);
        self.light.position = position;
        self.strike = Some(Strike {
            position,
            alpha: 1.0,
            bolt: build_bolt(position, rng),
        });
        self.strike_count += 1;
        self.phase = LightningPhase::Striking;

        log::debug!(
            "Lightning strike #{} at ({:.1}, {:.1}, {:.1}), intensity {:.1}",
            self.strike_count,
            x,
            y,
            z,
            intensity
        );
    }

    fn decay(&mut self) {
        self.light.intensity = (self.light.intensity - LIGHT_DECAY).max(0.0);

        let Some(strike) = self.strike.as_mut() else {
            self.phase = LightningPhase::Armed;
            return;
        };

        strike.alpha = (strike.alpha - ALPHA_DECAY).max(0.0);
        if strike.alpha <= ALPHA_EPSILON {
            self.strike = None;
            self.phase = LightningPhase::Armed;
        } else {
            self.phase = LightningPhase::Fading;
        }
    }

    #[inline]
    pub fn phase(&self) -> LightningPhase {
        self.phase
    }

    #[inline]
    pub fn strike(&self) -> Option<&Strike> {
        self.strike.as_ref()
    }

    #[inline]
    pub fn light(&self) -> &LightState {
        &self.light
    }

    /// Glow sprite for the current strike, if any.
    pub fn glow(&self) -> Option<GlowSprite> {
        self.strike.as_ref().map(|s| GlowSprite {
            center: s.position,
            opacity: s.alpha * 0.5,
            color: self.light.color,
            texture: glow_texture(),
        })
    }

    /// Strikes triggered since creation.
    #[inline]
    pub fn strike_count(&self) -> u64 {
        self.strike_count
    }
}

/// Jagged line from `BOLT_RISE` above the strike to a jittered ground point.
fn build_bolt(strike: Vec3, rng: &mut dyn RandomSource) -> Vec<Vec3> {
    let top = Vec3::new(strike.x, strike.y + BOLT_RISE, strike.z);
    let ground = Vec3::new(
        strike.x + rng.signed(GROUND_JITTER),
        0.0,
        strike.z + rng.signed(GROUND_JITTER),
    );

    let mut points = Vec::with_capacity(BOLT_SEGMENTS + 1);
    points.push(top);
    for i in 1..BOLT_SEGMENTS {
        let t = i as f32 / BOLT_SEGMENTS as f32;
        let jitter = Vec3::new(rng.signed(SEGMENT_JITTER), 0.0, rng.signed(SEGMENT_JITTER));
        points.push(top.lerp(ground, t) + jitter);
    }
    points.push(ground);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::rng::{ScriptedRng, SimRng};

    fn storm(frequency: f32) -> StormConfig {
        StormConfig {
            enabled: true,
            frequency,
            ..StormConfig::default()
        }
    }

    /// Every sample 0.999 is above any threshold.
    fn hit() -> ScriptedRng {
        ScriptedRng::constant(0.999)
    }

    fn miss() -> ScriptedRng {
        ScriptedRng::constant(0.0)
    }

    #[test]
    fn test_threshold_formula() {
        assert!((strike_threshold(0.0) - 0.995).abs() < 1e-6);
        assert!((strike_threshold(1.0) - 0.945).abs() < 1e-6);
        assert!((strike_threshold(0.5) - 0.97).abs() < 1e-6);
    }

    #[test]
    fn test_trigger_boundary_is_strict() {
        let mut l = Lightning::new();
        let mut at = ScriptedRng::constant(strike_threshold(0.0));
        assert_eq!(l.step(&storm(0.0), 50.0, &mut at), LightningPhase::Armed);
        assert!(l.strike().is_none());
        assert_eq!(at.draws, 1);

        let mut above = ScriptedRng::constant(0.996);
        assert_eq!(l.step(&storm(0.0), 50.0, &mut above), LightningPhase::Striking);
        assert!(l.strike().is_some());
    }

    #[test]
    fn test_strike_values() {
        let mut l = Lightning::new();
        let cfg = storm(1.0);
        l.step(&cfg, 50.0, &mut hit());

        let s = l.strike().unwrap();
        assert_eq!(s.alpha, 1.0);
        assert!((s.position.x - 49.9).abs() < 1e-3);
        assert!((s.position.z - 49.9).abs() < 1e-3);
        // 50 + 0 + (0.999 - 0.5) * 10
        assert!((s.position.y - 54.99).abs() < 1e-3);
        assert!((l.light().intensity - (100.0 + 0.999 * 200.0)).abs() < 1e-3);
        assert_eq!(l.light().position, s.position);
        assert_eq!(l.light().color, cfg.color);
        assert_eq!(l.strike_count(), 1);
    }

    #[test]
    fn test_strike_height_uses_offset_and_variance() {
        let mut l = Lightning::new();
        let cfg = StormConfig {
            height_offset: -20.0,
            height_variance: 30.0,
            ..storm(1.0)
        };
        l.step(&cfg, 50.0, &mut hit());

        let s = l.strike().unwrap();
        // 50 - 20 + (0.999 - 0.5) * 30
        assert!((s.position.y - 44.97).abs() < 1e-3, "y = {}", s.position.y);
        assert!((s.bolt[0].y - (44.97 + BOLT_RISE)).abs() < 1e-3);
        assert_eq!(l.light().position.y, s.position.y);

        // Low sample puts the strike below the offset height
        l.step(&cfg, 50.0, &mut ScriptedRng::new(&[0.999, 0.5, 0.5, 0.5, 0.1]));
        let s = l.strike().unwrap();
        // 50 - 20 + (0.1 - 0.5) * 30
        assert!((s.position.y - 18.0).abs() < 1e-3, "y = {}", s.position.y);
    }

    #[test]
    fn test_light_color_follows_config() {
        let mut l = Lightning::new();
        let mut cfg = storm(1.0);

        cfg.color = [1.0, 0.0, 0.0];
        l.step(&cfg, 50.0, &mut miss());
        assert_eq!(l.phase(), LightningPhase::Armed);
        assert_eq!(l.light().color, [1.0, 0.0, 0.0]);

        l.step(&cfg, 50.0, &mut hit());
        assert_eq!(l.glow().unwrap().color, [1.0, 0.0, 0.0]);

        cfg.color = [0.0, 1.0, 0.0];
        assert_eq!(l.step(&cfg, 50.0, &mut miss()), LightningPhase::Fading);
        assert_eq!(l.light().color, [0.0, 1.0, 0.0]);
        assert_eq!(l.glow().unwrap().color, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_bolt_geometry() {
        let mut l = Lightning::new();
        l.step(&storm(1.0), 50.0, &mut SimRng::from_seed_u64(11));
        // Force a strike regardless of the seeded draw
        l.step(&storm(1.0), 50.0, &mut hit());
        let s = l.strike().unwrap();

        assert_eq!(s.bolt.len(), BOLT_SEGMENTS + 1);
        let top = s.bolt[0];
        assert_eq!(top, s.position + Vec3::new(0.0, BOLT_RISE, 0.0));
        let ground = *s.bolt.last().unwrap();
        assert_eq!(ground.y, 0.0);
        assert!((ground.x - s.position.x).abs() <= GROUND_JITTER);
        assert!((ground.z - s.position.z).abs() <= GROUND_JITTER);
        // Heights strictly descend
        for pair in s.bolt.windows(2) {
            assert!(pair[1].y < pair[0].y);
        }
    }

    #[test]
    fn test_fade_clears_after_ten_frames() {
        let mut l = Lightning::new();
        let cfg = storm(0.5);
        l.step(&cfg, 50.0, &mut hit());
        assert_eq!(l.strike().unwrap().alpha, 1.0);

        let mut rng = miss();
        for frame in 1..=9 {
            assert_eq!(l.step(&cfg, 50.0, &mut rng), LightningPhase::Fading);
            let alpha = l.strike().unwrap().alpha;
            let expected = 1.0 - frame as f32 * 0.1;
            assert!((alpha - expected).abs() < 1e-5, "frame {frame}: alpha {alpha}");
        }

        assert_eq!(l.step(&cfg, 50.0, &mut rng), LightningPhase::Armed);
        assert!(l.strike().is_none());
        assert!(l.glow().is_none());
    }

    #[test]
    fn test_light_decays_to_zero() {
        let mut l = Lightning::new();
        let cfg = storm(0.5);
        l.step(&cfg, 50.0, &mut hit());
        let start = l.light().intensity;

        let mut rng = miss();
        l.step(&cfg, 50.0, &mut rng);
        assert!((l.light().intensity - (start - 20.0)).abs() < 1e-3);

        for _ in 0..100 {
            l.step(&cfg, 50.0, &mut rng);
        }
        assert_eq!(l.light().intensity, 0.0);
    }

    #[test]
    fn test_storm_off_clears_immediately() {
        let mut l = Lightning::new();
        l.step(&storm(1.0), 50.0, &mut hit());
        assert!(l.strike().is_some());

        let mut rng = hit();
        let off = StormConfig { enabled: false, ..storm(1.0) };
        assert_eq!(l.step(&off, 50.0, &mut rng), LightningPhase::Idle);
        assert!(l.strike().is_none());
        assert_eq!(l.light().intensity, 0.0);
        // No samples consumed while the storm is off
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_new_strike_replaces_fading_one() {
        let mut l = Lightning::new();
        let cfg = storm(1.0);
        l.step(&cfg, 50.0, &mut hit());
        l.step(&cfg, 50.0, &mut miss());
        assert_eq!(l.phase(), LightningPhase::Fading);

        l.step(&cfg, 50.0, &mut hit());
        assert_eq!(l.phase(), LightningPhase::Striking);
        assert_eq!(l.strike().unwrap().alpha, 1.0);
        assert_eq!(l.strike_count(), 2);
    }

    #[test]
    fn test_glow_follows_alpha() {
        let mut l = Lightning::new();
        let cfg = storm(1.0);
        l.step(&cfg, 50.0, &mut hit());
        let g = l.glow().unwrap();
        assert!((g.opacity - 0.5).abs() < 1e-6);
        assert_eq!(g.center, l.strike().unwrap().position);

        l.step(&cfg, 50.0, &mut miss());
        assert!((l.glow().unwrap().opacity - 0.45).abs() < 1e-5);
    }

    #[test]
    fn test_invariants_under_random_storm() {
        let mut l = Lightning::new();
        let mut rng = SimRng::from_seed_u64(99);
        let mut cfg = storm(1.0);
        for frame in 0..5000 {
            // Toggle the storm now and then
            cfg.enabled = frame % 700 < 600;
            l.step(&cfg, 50.0, &mut rng);
            assert!(l.light().intensity >= 0.0);
            if let Some(s) = l.strike() {
                assert!((0.0..=1.0).contains(&s.alpha));
            }
            if !cfg.enabled {
                assert!(l.strike().is_none());
                assert_eq!(l.light().intensity, 0.0);
            }
        }
    }

    #[test]
    fn test_strike_rate_at_full_frequency() {
        let mut l = Lightning::new();
        let mut rng = SimRng::from_seed_u64(2024);
        let cfg = storm(1.0);
        for _ in 0..1000 {
            l.step(&cfg, 50.0, &mut rng);
        }
        // Binomial(1000, 0.055): mean 55, sd ~7.2
        let n = l.strike_count();
        assert!((30..=80).contains(&n), "strike count {n}");
    }

    #[test]
    fn test_strike_rate_at_zero_frequency() {
        let mut l = Lightning::new();
        let mut rng = SimRng::from_seed_u64(2024);
        let cfg = storm(0.0);
        for _ in 0..20_000 {
            l.step(&cfg, 50.0, &mut rng);
        }
        // Binomial(20000, 0.005): mean 100, sd ~10
        let n = l.strike_count();
        assert!((60..=140).contains(&n), "strike count {n}");
    }
}
