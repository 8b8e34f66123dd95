//! Theme system for the TUI
//!
//! - `palette` - Color sets for the dark and light themes
//! - `styles` - Semantic style builder functions

pub mod palette;
pub mod styles;

pub use palette::Palette;
