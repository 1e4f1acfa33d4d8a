//! Frame timing utilities

use std::time::{Duration, Instant};

/// Largest frame delta fed to the simulation, in seconds.
///
/// A suspended tab or a debugger pause can produce multi-second gaps; the
/// simulation treats those as a single long-ish frame instead.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Clamp an elapsed time to `[0, MAX_FRAME_DT]`. NaN maps to zero.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

/// Tracks wall-clock frame timing and produces simulation deltas
pub struct FrameClock {
    last_frame: Instant,
    raw_delta: Duration,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameClock {
    /// Create a new frame clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            raw_delta: Duration::ZERO,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame. Returns the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.record(now)
    }

    fn record(&mut self, now: Instant) -> f32 {
        self.raw_delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second
        let fps_elapsed = now.saturating_duration_since(self.fps_timer);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }

        self.delta_secs()
    }

    /// Time since the last `tick`, for pacing a loop
    pub fn last_frame_age(&self) -> Duration {
        self.last_frame.elapsed()
    }

    /// Clamped delta of the last frame in seconds
    pub fn delta_secs(&self) -> f32 {
        sanitize_dt(self.raw_delta.as_secs_f32())
    }

    /// Unclamped wall-clock delta of the last frame
    pub fn raw_delta(&self) -> Duration {
        self.raw_delta
    }

    /// Current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
