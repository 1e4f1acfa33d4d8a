//! Live parameter store and panel command handling.
//!
//! [`LiveConfig`] is the single source of truth the panel edits and the
//! frame driver reads; [`ParamPanel`] maps panel commands onto it.

pub mod handler;
pub mod live;

pub use handler::{ParamPanel, StatusSlot};
pub use live::LiveConfig;
