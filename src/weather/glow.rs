//! Shared glow sprite texture.
//!
//! A soft radial gradient used for the lightning glow sprite. Built once per
//! process on first use and shared by every weather system.

use std::sync::OnceLock;

/// Edge length of the glow texture in pixels.
pub const GLOW_SIZE: u32 = 64;

/// RGBA8 texture data.
#[derive(Debug)]
pub struct GlowTexture {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, white with alpha falling off radially.
    pub rgba: Vec<u8>,
}

static GLOW: OnceLock<GlowTexture> = OnceLock::new();

/// Process-wide glow texture, built on first call.
pub fn glow_texture() -> &'static GlowTexture {
    GLOW.get_or_init(|| {
        log::debug!("Building {GLOW_SIZE}x{GLOW_SIZE} glow texture");
        build(GLOW_SIZE)
    })
}

fn build(size: u32) -> GlowTexture {
    let half = size as f32 * 0.5;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = (x as f32 + 0.5 - half) / half;
            let dy = (y as f32 + 0.5 - half) / half;
            let r = (dx * dx + dy * dy).sqrt();
            // Gradient stops: opaque core, 20% at mid radius, clear at edge
            let a = if r < 0.2 {
                1.0
            } else if r < 0.5 {
                1.0 - (r - 0.2) / 0.3 * 0.8
            } else {
                (0.2 * (1.0 - (r - 0.5) / 0.5)).max(0.0)
            };
            rgba.extend_from_slice(&[255, 255, 255, (a * 255.0).round() as u8]);
        }
    }
    GlowTexture {
        width: size,
        height: size,
        rgba,
    }
}

impl GlowTexture {
    /// Alpha at pixel `(x, y)`, or `None` outside the texture.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.rgba.get(((y * self.width + x) * 4 + 3) as usize).copied()
    }
}
