//! Cloud field generator.
//!
//! Produces a set of cloud placements from `(count, bounds, seed)` and keeps
//! it until one of those inputs changes, so clouds do not jump between
//! frames.

use glam::Vec3;

use crate::weather::config::CloudConfig;
use crate::weather::rng::RandomSource;

/// One cloud instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudPlacement {
    /// Offset inside the bounds volume, each axis in `[-bound, +bound]`.
    pub position: Vec3,
    /// Uniform scale in `[1, 2)`.
    pub scale: f32,
    /// Per-cloud shape seed in `[0, 100)`.
    pub seed: f32,
}

impl CloudPlacement {
    /// Where the renderer draws this cloud: horizontal offset at the layer
    /// altitude. The vertical offset is not used for drawing.
    #[inline]
    pub fn render_position(&self, layer_height: f32) -> Vec3 {
        Vec3::new(self.position.x, layer_height, self.position.z)
    }
}

/// Memo key: every input that forces a regeneration.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FieldKey {
    count: u32,
    bounds: [f32; 3],
    seed: u32,
}

impl From<&CloudConfig> for FieldKey {
    fn from(c: &CloudConfig) -> Self {
        Self {
            count: c.count,
            bounds: c.bounds,
            seed: c.seed,
        }
    }
}

/// Generate `count` placements. Consumes five samples per cloud.
pub fn generate(count: u32, bounds: [f32; 3], rng: &mut dyn RandomSource) -> Vec<CloudPlacement> {
    (0..count)
        .map(|_| {
            let x = rng.signed(bounds[0]);
            let y = rng.signed(bounds[1]);
            let z = rng.signed(bounds[2]);
            CloudPlacement {
                position: Vec3::new(x, y, z),
                scale: rng.range(1.0, 2.0),
                seed: rng.range(0.0, 100.0),
            }
        })
        .collect()
}

/// Memoized cloud field.
#[derive(Debug, Default)]
pub struct CloudField {
    key: Option<FieldKey>,
    placements: Vec<CloudPlacement>,
    generation: u64,
}

impl CloudField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate if the generator inputs changed. Returns `true` when a new
    /// set was produced.
    pub fn update(&mut self, config: &CloudConfig, rng: &mut dyn RandomSource) -> bool {
        let key = FieldKey::from(config);
        if self.key == Some(key) {
            return false;
        }

        self.placements = generate(key.count, key.bounds, rng);
        self.key = Some(key);
        self.generation += 1;
        log::info!(
            "Cloud field regenerated: {} clouds, bounds {:?}, seed {} (generation {})",
            key.count,
            key.bounds,
            key.seed,
            self.generation
        );
        true
    }

    #[inline]
    pub fn placements(&self) -> &[CloudPlacement] {
        &self.placements
    }

    /// Number of regenerations so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
