//! In-process panel dispatcher

use thiserror::Error;

use crate::protocol::{PanelCommand, PanelResponse};

/// Trait that the application implements to handle panel commands
pub trait PanelHandler {
    fn handle_command(&mut self, cmd: PanelCommand) -> PanelResponse;
}

/// Clipboard failure
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Destination of the "export configuration" action
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps the last copied text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Turns JSON command lines into JSON response lines
pub struct DebugPanel<H: PanelHandler> {
    handler: H,
    commands_handled: u64,
}

impl<H: PanelHandler> DebugPanel<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            commands_handled: 0,
        }
    }

    /// Handle one command line. Never fails: malformed input produces an
    /// error response.
    pub fn dispatch(&mut self, line: &str) -> String {
        let trimmed = line.trim();
        let response = if trimmed.is_empty() {
            PanelResponse::error("Empty command")
        } else {
            match serde_json::from_str::<PanelCommand>(trimmed) {
                Ok(cmd) => self.execute(cmd),
                Err(e) => PanelResponse::error(format!("Invalid command JSON: {}", e)),
            }
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                "{{\"status\":\"error\",\"message\":\"Serialize error: {}\"}}",
                e
            )
        })
    }

    /// Handle an already parsed command
    pub fn execute(&mut self, cmd: PanelCommand) -> PanelResponse {
        log::debug!("Panel command: {:?}", cmd);
        self.commands_handled += 1;
        let response = self.handler.handle_command(cmd);
        if let PanelResponse::Error { message } = &response {
            log::warn!("Panel command failed: {}", message);
        }
        response
    }

    pub fn commands_handled(&self) -> u64 {
        self.commands_handled
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}
