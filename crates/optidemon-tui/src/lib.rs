//! optidemon-tui - Terminal UI for optidemon
//!
//! This crate provides the ratatui-based terminal interface. It creates an Engine
//! from optidemon-app and adds terminal rendering, event polling, widget display
//! and an OSC 52 clipboard.

pub mod clipboard;
pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use clipboard::Osc52Clipboard;
pub use runner::run_with_source;
