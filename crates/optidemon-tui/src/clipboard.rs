//! System clipboard through the OSC 52 escape sequence
//!
//! The terminal emulator owns the clipboard, so this works over SSH and in
//! multiplexers that forward OSC 52.

use std::io::Write;

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use optidemon_app::ClipboardWriter;
use optidemon_core::prelude::*;

#[derive(Debug, Default, Clone, Copy)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    /// Emit the copy sequence for `text` into `out`.
    pub fn write_to<W: Write>(out: &mut W, text: &str) -> Result<()> {
        execute!(out, CopyToClipboard::to_clipboard_from(text))
            .map_err(|e| Error::clipboard(e.to_string()))
    }
}

impl ClipboardWriter for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        Self::write_to(&mut std::io::stdout(), text)
    }
}
