//! Host clipboard access for copying generated JSON.
//!
//! A failed copy is reported to the caller and never touches history.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClipboardError {
    #[error("Unavailable: {message}")]
    Unavailable { message: String },
    #[error("Write: {message}")]
    Write { message: String },
    #[error("NothingToCopy: {message}")]
    NothingToCopy { message: String },
}

impl ClipboardError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    pub fn nothing_to_copy(message: impl Into<String>) -> Self {
        Self::NothingToCopy {
            message: message.into(),
        }
    }
}

pub trait ClipboardPort {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard, opened on first use so headless sessions can still start.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::unavailable("Clipboard not initialized"))
    }
}

impl ClipboardPort for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self.handle()?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::write(e.to_string()))?;
        log::debug!("Clipboard: copied {} bytes", text.len());
        Ok(())
    }
}

/// In-process clipboard that remembers the last copied text.
#[derive(Debug, Default, Clone)]
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

impl ClipboardPort for MemoryClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
