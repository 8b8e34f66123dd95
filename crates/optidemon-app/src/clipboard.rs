//! Clipboard seam
//!
//! The copy action writes through [`ClipboardWriter`]; the TUI supplies an
//! OSC 52 implementation and tests supply a mock.

use optidemon_core::prelude::*;

#[cfg(test)]
use mockall::automock;

/// Sink for copied text.
#[cfg_attr(test, automock)]
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard that accepts and discards everything (headless mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClipboard;

impl ClipboardWriter for NullClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        trace!("Discarding {} bytes of copied text", text.len());
        Ok(())
    }
}
