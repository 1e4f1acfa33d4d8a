//! Parameter panel for stormsky - JSON commands that tune a running sky
//!
//! The application implements [`PanelHandler`] and feeds command lines to a
//! [`DebugPanel`]:
//! ```ignore
//! let mut panel = DebugPanel::new(MyHandler::new());
//! let reply = panel.dispatch(r#"{"cmd":"SetStorm","params":{"enabled":true}}"#);
//! ```

pub mod panel;
pub mod protocol;

pub use panel::{Clipboard, ClipboardError, DebugPanel, MemoryClipboard, PanelHandler};
pub use protocol::*;
