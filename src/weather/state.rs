//! Renderer-facing frame output and GPU uniform.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::weather::clouds::CloudPlacement;
use crate::weather::config::CloudStyle;
use crate::weather::lightning::{GlowSprite, LightState, LightningPhase};
use crate::weather::wind::WindState;

// ---------------------------------------------------------------------------
// Frame output
// ---------------------------------------------------------------------------

/// Everything a renderer needs to draw one frame. Borrowed from the
/// [`super::WeatherSystem`]; `None` effects are skipped for the frame.
#[derive(Clone, Debug)]
pub struct WeatherFrame<'a> {
    pub clouds: CloudLayer<'a>,
    pub wind: &'a WindState,
    pub light: &'a LightState,
    pub lightning_phase: LightningPhase,
    pub strike: Option<StrikeFrame<'a>>,
    pub rain: Option<RainFrame<'a>>,
}

/// The cloud group.
#[derive(Clone, Debug)]
pub struct CloudLayer<'a> {
    pub placements: &'a [CloudPlacement],
    /// Altitude the clouds are drawn at.
    pub height: f32,
    pub style: &'a CloudStyle,
    /// Rotation of the whole group around +Y, radians.
    pub rotation: f32,
}

/// Visible strike: bolt polyline plus glow.
#[derive(Clone, Debug)]
pub struct StrikeFrame<'a> {
    pub bolt: &'a [Vec3],
    pub alpha: f32,
    pub glow: GlowSprite,
}

/// Rain particle system.
#[derive(Clone, Debug)]
pub struct RainFrame<'a> {
    pub positions: &'a [Vec3],
    /// Equal to the rain intensity.
    pub opacity: f32,
}

// ---------------------------------------------------------------------------
// GPU uniform
// ---------------------------------------------------------------------------

/// GPU-ready storm light uniform.
///
/// `vec3` fields are packed with a trailing scalar to keep 16-byte rows.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StormUniform {
    pub light_position: [f32; 3],
    pub light_intensity: f32,
    pub light_color: [f32; 3],
    pub strike_alpha: f32,
    pub wind_drift: [f32; 3],
    pub cloud_rotation: f32,
}

impl From<&WeatherFrame<'_>> for StormUniform {
    fn from(f: &WeatherFrame<'_>) -> Self {
        Self {
            light_position: f.light.position.to_array(),
            light_intensity: f.light.intensity,
            light_color: f.light.color,
            strike_alpha: f.strike.as_ref().map_or(0.0, |s| s.alpha),
            wind_drift: f.wind.drift.to_array(),
            cloud_rotation: f.clouds.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<StormUniform>(), 48);
        assert_eq!(std::mem::size_of::<StormUniform>() % 16, 0);
    }
}
