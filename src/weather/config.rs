//! Weather configuration: the tunable scalars the parameter panel edits.
//!
//! A [`WeatherConfig`] is an immutable-per-frame snapshot. The simulation
//! never mutates it; the panel edits it through
//! [`crate::params::LiveConfig`].

use serde::{Deserialize, Serialize};

use crate::core::Result;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full weather configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Cloud field generator inputs.
    pub clouds: CloudConfig,
    /// Render-only cloud look.
    pub cloud_style: CloudStyle,
    /// Wind parameters.
    pub wind: WindConfig,
    /// Storm flag and lightning parameters.
    pub storm: StormConfig,
    /// Rain parameters.
    pub rain: RainConfig,
}

impl WeatherConfig {
    /// Return a copy with every field forced into its panel range.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            clouds: CloudConfig {
                count: self.clouds.count.clamp(1, 100),
                seed: self.clouds.seed.clamp(1, 100),
                bounds: [
                    clamp_or(self.clouds.bounds[0], 0.0, 100.0, d.clouds.bounds[0]),
                    clamp_or(self.clouds.bounds[1], 0.0, 100.0, d.clouds.bounds[1]),
                    clamp_or(self.clouds.bounds[2], 0.0, 100.0, d.clouds.bounds[2]),
                ],
                height: clamp_or(self.clouds.height, 0.0, 200.0, d.clouds.height),
            },
            cloud_style: CloudStyle {
                segments: self.cloud_style.segments.clamp(1, 80),
                volume: clamp_or(self.cloud_style.volume, 0.0, 100.0, d.cloud_style.volume),
                opacity: clamp_or(self.cloud_style.opacity, 0.0, 1.0, d.cloud_style.opacity),
                fade: clamp_or(self.cloud_style.fade, 0.0, 400.0, d.cloud_style.fade),
                growth: clamp_or(self.cloud_style.growth, 0.0, 20.0, d.cloud_style.growth),
                color: clamp_color(self.cloud_style.color, d.cloud_style.color),
            },
            wind: WindConfig {
                speed: clamp_or(self.wind.speed, 0.0, 1.0, d.wind.speed),
                angle_degrees: clamp_or(self.wind.angle_degrees, 0.0, 360.0, d.wind.angle_degrees),
            },
            storm: StormConfig {
                enabled: self.storm.enabled,
                frequency: clamp_or(self.storm.frequency, 0.0, 1.0, d.storm.frequency),
                intensity: clamp_or(self.storm.intensity, 0.0, 500.0, d.storm.intensity),
                color: clamp_color(self.storm.color, d.storm.color),
                height_variance: clamp_or(
                    self.storm.height_variance,
                    0.0,
                    100.0,
                    d.storm.height_variance,
                ),
                height_offset: clamp_or(
                    self.storm.height_offset,
                    -50.0,
                    50.0,
                    d.storm.height_offset,
                ),
            },
            rain: RainConfig {
                intensity: clamp_or(self.rain.intensity, 0.0, 1.0, d.rain.intensity),
                ceiling: clamp_or(self.rain.ceiling, 1.0, 200.0, d.rain.ceiling),
            },
        }
    }

    /// Serialize as pretty-printed JSON (the panel's export format).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON export. Missing fields take their defaults; the result
    /// is clamped.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.clamped())
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() { fallback } else { value.clamp(min, max) }
}

fn clamp_color(color: [f32; 3], fallback: [f32; 3]) -> [f32; 3] {
    [
        clamp_or(color[0], 0.0, 1.0, fallback[0]),
        clamp_or(color[1], 0.0, 1.0, fallback[1]),
        clamp_or(color[2], 0.0, 1.0, fallback[2]),
    ]
}

// ---------------------------------------------------------------------------
// Clouds
// ---------------------------------------------------------------------------

/// Inputs of the cloud field generator. Changing any of them regenerates
/// the field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Number of clouds (1-100).
    pub count: u32,
    /// Generator seed (1-100). Part of the memo key only.
    pub seed: u32,
    /// Half extents of the placement volume (x, y, z).
    pub bounds: [f32; 3],
    /// Altitude the cloud layer is drawn at; also the lightning base height.
    pub height: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            count: 20,
            seed: 1,
            bounds: [50.0, 20.0, 50.0],
            height: 50.0,
        }
    }
}

/// Per-cloud look forwarded to the renderer untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudStyle {
    pub segments: u32,
    pub volume: f32,
    pub opacity: f32,
    pub fade: f32,
    pub growth: f32,
    /// Linear RGB.
    pub color: [f32; 3],
}

impl Default for CloudStyle {
    fn default() -> Self {
        Self {
            segments: 20,
            volume: 10.0,
            opacity: 0.8,
            fade: 10.0,
            growth: 4.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

// ---------------------------------------------------------------------------
// Wind
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Wind speed (0-1).
    pub speed: f32,
    /// Heading in degrees (0-360), 0 = +X.
    pub angle_degrees: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            speed: 0.1,
            angle_degrees: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Storm / lightning
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StormConfig {
    /// Storm mode. Turning it off clears lightning immediately.
    pub enabled: bool,
    /// Strike frequency (0-1).
    pub frequency: f32,
    /// Base light intensity of a strike.
    pub intensity: f32,
    /// Lightning color (linear RGB).
    pub color: [f32; 3],
    /// Total spread of strike heights around the base height.
    pub height_variance: f32,
    /// Offset added to the base height.
    pub height_offset: f32,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            frequency: 0.5,
            intensity: 100.0,
            color: [0.8, 0.85, 1.0],
            height_variance: 10.0,
            height_offset: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Rain
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Rain intensity (0-1). Also the opacity of the rain particles.
    pub intensity: f32,
    /// Altitude particles are recycled to after reaching the ground.
    pub ceiling: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            ceiling: 50.0,
        }
    }
}
