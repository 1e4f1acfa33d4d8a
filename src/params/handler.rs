//! Panel command handler backed by a [`LiveConfig`].

use std::cell::Cell;
use std::rc::Rc;

use stormsky_debug::{
    Clipboard, PanelCommand, PanelHandler, PanelResponse, ResponseData, WeatherInfo,
};

use crate::core::Error;
use crate::params::live::LiveConfig;
use crate::weather::{WeatherConfig, WeatherStatus};

/// Slot the frame driver publishes the latest [`WeatherStatus`] into.
pub type StatusSlot = Rc<Cell<Option<WeatherStatus>>>;

/// Applies panel commands to the live config and serves export/status.
pub struct ParamPanel<C: Clipboard> {
    live: LiveConfig,
    clipboard: C,
    status: StatusSlot,
}

impl<C: Clipboard> ParamPanel<C> {
    pub fn new(live: LiveConfig, clipboard: C) -> Self {
        Self {
            live,
            clipboard,
            status: Rc::new(Cell::new(None)),
        }
    }

    /// Handle for the driver to publish status after each frame.
    pub fn status_slot(&self) -> StatusSlot {
        self.status.clone()
    }

    pub fn live(&self) -> &LiveConfig {
        &self.live
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Copy the current config to the clipboard. Reads through the live
    /// handle at call time.
    pub fn export(&mut self) -> crate::core::Result<usize> {
        let json = self.live.export_json()?;
        self.clipboard
            .set_text(&json)
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        Ok(json.len())
    }

    fn apply(&mut self, cmd: PanelCommand) -> PanelResponse {
        match cmd {
            PanelCommand::SetClouds { count, seed, bounds_x, bounds_y, bounds_z, height } => {
                self.live.update(|c| {
                    set(&mut c.clouds.count, count);
                    set(&mut c.clouds.seed, seed);
                    set(&mut c.clouds.bounds[0], bounds_x);
                    set(&mut c.clouds.bounds[1], bounds_y);
                    set(&mut c.clouds.bounds[2], bounds_z);
                    set(&mut c.clouds.height, height);
                });
                self.updated("clouds")
            }
            PanelCommand::SetCloudStyle { segments, volume, opacity, fade, growth, color } => {
                self.live.update(|c| {
                    let s = &mut c.cloud_style;
                    set(&mut s.segments, segments);
                    set(&mut s.volume, volume);
                    set(&mut s.opacity, opacity);
                    set(&mut s.fade, fade);
                    set(&mut s.growth, growth);
                    set(&mut s.color, color);
                });
                self.updated("cloud style")
            }
            PanelCommand::SetWind { speed, angle_degrees } => {
                self.live.update(|c| {
                    set(&mut c.wind.speed, speed);
                    set(&mut c.wind.angle_degrees, angle_degrees);
                });
                self.updated("wind")
            }
            PanelCommand::SetStorm { enabled } => {
                self.live.update(|c| c.storm.enabled = enabled);
                self.updated(if enabled { "storm on" } else { "storm off" })
            }
            PanelCommand::SetRain { intensity, ceiling } => {
                self.live.update(|c| {
                    set(&mut c.rain.intensity, intensity);
                    set(&mut c.rain.ceiling, ceiling);
                });
                self.updated("rain")
            }
            PanelCommand::SetLightning {
                frequency,
                intensity,
                color,
                height_variance,
                height_offset,
            } => {
                self.live.update(|c| {
                    let s = &mut c.storm;
                    set(&mut s.frequency, frequency);
                    set(&mut s.intensity, intensity);
                    set(&mut s.color, color);
                    set(&mut s.height_variance, height_variance);
                    set(&mut s.height_offset, height_offset);
                });
                self.updated("lightning")
            }
            PanelCommand::GetConfig => match serde_json::to_value(self.live.snapshot()) {
                Ok(config) => PanelResponse::ok(ResponseData::Config { config }),
                Err(e) => PanelResponse::error(format!("Serialize error: {}", e)),
            },
            PanelCommand::GetWeatherState => match self.status.get() {
                Some(s) => PanelResponse::ok(ResponseData::WeatherState(info(&s))),
                None => PanelResponse::error("No frame simulated yet"),
            },
            PanelCommand::ExportConfig => match self.export() {
                Ok(bytes) => {
                    log::info!("Exported configuration to clipboard ({} bytes)", bytes);
                    PanelResponse::ok(ResponseData::Exported { bytes })
                }
                Err(e) => {
                    log::warn!("Configuration export failed: {}", e);
                    PanelResponse::error(format!("Could not copy configuration: {}", e))
                }
            },
            PanelCommand::ResetDefaults => {
                self.live.replace(WeatherConfig::default());
                self.updated("defaults restored")
            }
            PanelCommand::Ping => PanelResponse::ok(ResponseData::Pong {
                message: "pong".to_string(),
            }),
        }
    }

    fn updated(&self, what: &str) -> PanelResponse {
        log::info!("Panel updated {}", what);
        PanelResponse::updated(what)
    }
}

impl<C: Clipboard> PanelHandler for ParamPanel<C> {
    fn handle_command(&mut self, cmd: PanelCommand) -> PanelResponse {
        self.apply(cmd)
    }
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *field = v;
    }
}

fn info(s: &WeatherStatus) -> WeatherInfo {
    WeatherInfo {
        frame: s.frame,
        cloud_count: s.cloud_count,
        cloud_generation: s.cloud_generation,
        wind_orientation: s.wind_orientation,
        lightning_phase: format!("{:?}", s.lightning_phase),
        strike_alpha: s.strike_alpha,
        light_intensity: s.light_intensity,
        strike_count: s.strike_count,
        rain_active: s.rain_active,
    }
}
