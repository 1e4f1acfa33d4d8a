//! Procedural sky weather simulation.
//!
//! Clouds, wind, lightning and rain, advanced once per rendered frame. The
//! main entry point is [`WeatherSystem`]: call [`advance`](WeatherSystem::advance)
//! with the current [`WeatherConfig`] snapshot and the elapsed time, then
//! read the renderer-facing [`WeatherFrame`].

pub mod clouds;
pub mod config;
pub mod glow;
pub mod lightning;
pub mod rain;
pub mod rng;
pub mod state;
pub mod wind;

// Re-exports
pub use clouds::{CloudField, CloudPlacement};
pub use config::{CloudConfig, CloudStyle, RainConfig, StormConfig, WeatherConfig, WindConfig};
pub use lightning::{GlowSprite, LightState, Lightning, LightningPhase, Strike};
pub use rain::RainPool;
pub use rng::{RandomSource, SimRng};
pub use state::{CloudLayer, RainFrame, StormUniform, StrikeFrame, WeatherFrame};
pub use wind::WindState;

use crate::core::time::sanitize_dt;

// ---------------------------------------------------------------------------
// WeatherSystem
// ---------------------------------------------------------------------------

/// Compact per-frame summary, for panels and logs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherStatus {
    pub frame: u64,
    pub cloud_count: u32,
    pub cloud_generation: u64,
    pub wind_orientation: f32,
    pub lightning_phase: LightningPhase,
    pub strike_alpha: Option<f32>,
    pub light_intensity: f32,
    pub strike_count: u64,
    pub rain_active: bool,
}

/// Weather simulation core. Owns all per-frame state and the random source.
pub struct WeatherSystem<R: RandomSource = SimRng> {
    rng: R,
    config: WeatherConfig,
    clouds: CloudField,
    wind: WindState,
    lightning: Lightning,
    rain: RainPool,
    frame_count: u64,
    elapsed: f64,
}

impl WeatherSystem<SimRng> {
    /// Create a system with the default-seeded RNG and a
    /// [`rain::DEFAULT_PARTICLES`]-drop rain pool.
    pub fn new(config: &WeatherConfig) -> Self {
        Self::with_rng(config, SimRng::default(), rain::DEFAULT_PARTICLES)
    }

    /// Create a system with a `ChaCha8` RNG seeded from `seed`.
    pub fn seeded(config: &WeatherConfig, seed: u64) -> Self {
        Self::with_rng(config, SimRng::from_seed_u64(seed), rain::DEFAULT_PARTICLES)
    }
}

impl<R: RandomSource> WeatherSystem<R> {
    /// Create a system with an injected random source and rain pool size.
    /// The cloud field and rain pool are generated immediately.
    pub fn with_rng(config: &WeatherConfig, mut rng: R, rain_particles: usize) -> Self {
        let mut clouds = CloudField::new();
        clouds.update(&config.clouds, &mut rng);
        let rain = RainPool::new(rain_particles, config.rain.ceiling, &mut rng);

        Self {
            rng,
            config: config.clone(),
            clouds,
            wind: WindState::default(),
            lightning: Lightning::new(),
            rain,
            frame_count: 0,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds using the given configuration snapshot.
    ///
    /// `dt` is clamped to `[0, MAX_FRAME_DT]`.
    pub fn advance(&mut self, config: &WeatherConfig, dt: f32) {
        let dt = sanitize_dt(dt);
        self.config.clone_from(config);

        self.clouds.update(&config.clouds, &mut self.rng);
        self.wind.integrate(&config.wind, dt);
        self.lightning.step(&config.storm, config.clouds.height, &mut self.rng);
        self.rain.advance(&config.rain, dt, &mut self.rng);

        self.frame_count += 1;
        self.elapsed += dt as f64;

        log::trace!(
            "Weather frame {}: dt {:.4}, rotation {:.3}, lightning {:?}, light {:.1}, rain {}",
            self.frame_count,
            dt,
            self.wind.orientation,
            self.lightning.phase(),
            self.lightning.light().intensity,
            self.rain.is_active()
        );
    }

    /// Renderer-facing view of the current state.
    pub fn frame(&self) -> WeatherFrame<'_> {
        let strike = self
            .lightning
            .strike()
            .zip(self.lightning.glow())
            .map(|(s, glow)| StrikeFrame {
                bolt: &s.bolt,
                alpha: s.alpha,
                glow,
            });
        let rain = self.rain.is_active().then(|| RainFrame {
            positions: self.rain.positions(),
            opacity: self.config.rain.intensity,
        });

        WeatherFrame {
            clouds: CloudLayer {
                placements: self.clouds.placements(),
                height: self.config.clouds.height,
                style: &self.config.cloud_style,
                rotation: self.wind.orientation,
            },
            wind: &self.wind,
            light: self.lightning.light(),
            lightning_phase: self.lightning.phase(),
            strike,
            rain,
        }
    }

    /// GPU-ready uniform from the current state.
    pub fn uniform(&self) -> StormUniform {
        StormUniform::from(&self.frame())
    }

    pub fn status(&self) -> WeatherStatus {
        WeatherStatus {
            frame: self.frame_count,
            cloud_count: self.clouds.placements().len() as u32,
            cloud_generation: self.clouds.generation(),
            wind_orientation: self.wind.orientation,
            lightning_phase: self.lightning.phase(),
            strike_alpha: self.lightning.strike().map(|s| s.alpha),
            light_intensity: self.lightning.light().intensity,
            strike_count: self.lightning.strike_count(),
            rain_active: self.rain.is_active(),
        }
    }

    #[inline]
    pub fn clouds(&self) -> &CloudField {
        &self.clouds
    }

    #[inline]
    pub fn wind(&self) -> &WindState {
        &self.wind
    }

    #[inline]
    pub fn lightning(&self) -> &Lightning {
        &self.lightning
    }

    #[inline]
    pub fn rain(&self) -> &RainPool {
        &self.rain
    }

    /// Frames advanced so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulated seconds (sum of clamped deltas).
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
