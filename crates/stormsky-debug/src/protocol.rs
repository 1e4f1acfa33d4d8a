//! Panel protocol - JSON command/response definitions

use serde::{Deserialize, Serialize};

/// Commands sent by the parameter panel.
///
/// Setters only touch the fields that are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum PanelCommand {
    /// Cloud field generator inputs
    SetClouds {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bounds_x: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bounds_y: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bounds_z: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f32>,
    },
    /// Cloud look (render only)
    SetCloudStyle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        segments: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        volume: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        opacity: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fade: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        growth: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<[f32; 3]>,
    },
    /// Wind speed and heading
    SetWind {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angle_degrees: Option<f32>,
    },
    /// Storm mode on/off
    SetStorm { enabled: bool },
    /// Rain parameters
    SetRain {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intensity: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ceiling: Option<f32>,
    },
    /// Lightning parameters
    SetLightning {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        frequency: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intensity: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<[f32; 3]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height_variance: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height_offset: Option<f32>,
    },
    /// Get the current configuration
    GetConfig,
    /// Get the simulation state of the last frame
    GetWeatherState,
    /// Copy the current configuration to the clipboard as JSON
    ExportConfig,
    /// Restore every parameter to its default
    ResetDefaults,
    /// Ping (health check)
    Ping,
}

/// Responses from the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum PanelResponse {
    #[serde(rename = "ok")]
    Ok { data: ResponseData },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    None,
    Pong { message: String },
    ParamsUpdated { description: String },
    Config { config: serde_json::Value },
    Exported { bytes: usize },
    WeatherState(WeatherInfo),
}

/// Snapshot of the simulation as seen by the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub frame: u64,
    pub cloud_count: u32,
    pub cloud_generation: u64,
    pub wind_orientation: f32,
    pub lightning_phase: String,
    pub strike_alpha: Option<f32>,
    pub light_intensity: f32,
    pub strike_count: u64,
    pub rain_active: bool,
}

impl PanelResponse {
    pub fn ok(data: ResponseData) -> Self {
        Self::Ok { data }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error {
            message: msg.into(),
        }
    }

    pub fn updated(description: impl Into<String>) -> Self {
        Self::ok(ResponseData::ParamsUpdated {
            description: description.into(),
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}
