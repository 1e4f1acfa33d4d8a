//! Error types for stormsky
//!
//! The per-frame simulation never fails; only the outer surfaces (config
//! import/export, clipboard, panel commands) report errors.

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}
