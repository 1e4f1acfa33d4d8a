//! Stormsky - procedural sky weather simulation
//!
//! Clouds, wind, lightning and rain for an animated sky, advanced once per
//! rendered frame and tuned live through a parameter panel.

pub mod core;
pub mod params;
pub mod weather;
