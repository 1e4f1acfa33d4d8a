//! Stormsky - headless weather session
//!
//! Drives a [`WeatherSystem`] through a scripted panel session (clear sky,
//! rain, storm, export, calm) and logs what happens. By default every frame
//! advances a fixed 60 Hz step; with `--realtime` the loop is paced to 60 Hz
//! and fed the measured wall-clock delta. Set `RUST_LOG=debug` to see
//! individual strikes.

use std::time::{Duration, Instant};

use stormsky::core::logging;
use stormsky::core::time::FrameClock;
use stormsky::params::{LiveConfig, ParamPanel};
use stormsky::weather::{LightningPhase, WeatherSystem};
use stormsky_debug::{DebugPanel, MemoryClipboard};

const STEP: f32 = 1.0 / 60.0;
const FRAMES: u64 = 1800;

/// (frame, panel command) pairs, sent before the frame is simulated.
const SCRIPT: &[(u64, &str)] = &[
    (0, r#"{"cmd":"Ping"}"#),
    (120, r#"{"cmd":"SetRain","params":{"intensity":0.6,"ceiling":60}}"#),
    (300, r#"{"cmd":"SetStorm","params":{"enabled":true}}"#),
    (300, r#"{"cmd":"SetLightning","params":{"frequency":0.8,"intensity":120}}"#),
    (600, r#"{"cmd":"SetClouds","params":{"count":30}}"#),
    (900, r#"{"cmd":"SetWind","params":{"speed":0.5,"angle_degrees":45}}"#),
    (1200, r#"{"cmd":"ExportConfig"}"#),
    (1300, r#"{"cmd":"GetWeatherState"}"#),
    (1500, r#"{"cmd":"SetStorm","params":{"enabled":false}}"#),
    (1600, r#"{"cmd":"SetRain","params":{"intensity":0}}"#),
];

fn main() {
    logging::init();

    let realtime = std::env::args().skip(1).any(|a| a == "--realtime");

    let live = LiveConfig::default();
    let mut panel = DebugPanel::new(ParamPanel::new(live.clone(), MemoryClipboard::new()));
    let status = panel.handler().status_slot();
    let mut system = WeatherSystem::new(&live.snapshot());

    log::info!(
        "=== Stormsky weather session: {} frames at {:.1} Hz ({}) ===",
        FRAMES,
        1.0 / STEP,
        if realtime { "realtime" } else { "fixed step" }
    );

    let started = Instant::now();
    let mut clock = FrameClock::new();
    let mut script = SCRIPT.iter().peekable();
    let mut last_phase = LightningPhase::Idle;

    for frame in 0..FRAMES {
        while let Some((_, line)) = script.next_if(|(at, _)| *at == frame) {
            let reply = panel.dispatch(line);
            log::info!("[frame {}] {} -> {}", frame, line, reply);
        }

        if realtime {
            let spent = clock.last_frame_age();
            if let Some(rest) = Duration::from_secs_f32(STEP).checked_sub(spent) {
                std::thread::sleep(rest);
            }
        }
        let measured = clock.tick();
        let dt = if realtime { measured } else { STEP };

        let config = live.snapshot();
        system.advance(&config, dt);
        status.set(Some(system.status()));

        let phase = system.lightning().phase();
        if phase != last_phase && matches!(phase, LightningPhase::Idle | LightningPhase::Armed) {
            log::debug!("[frame {}] lightning {:?}", frame, phase);
        }
        last_phase = phase;
    }

    let s = system.status();
    log::info!(
        "Done in {:.1} ms ({} frames, {:.0} FPS): {:.2} simulated seconds, {} strikes, {} cloud regenerations, wind rotation {:.3} rad",
        started.elapsed().as_secs_f64() * 1000.0,
        clock.frame_count(),
        clock.fps(),
        system.elapsed(),
        s.strike_count,
        s.cloud_generation,
        s.wind_orientation
    );
    if let Some(text) = panel.handler().clipboard().contents() {
        log::info!("Clipboard holds {} bytes of exported configuration", text.len());
    }
}
