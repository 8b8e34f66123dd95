//! optidemon library
//!
//! Terminal client for the generate-tests / optimize / evaluate workflow. The
//! binary picks between the TUI and the headless NDJSON runner.

pub mod headless;

// Re-export main entry points
pub use headless::runner::run_headless;
pub use optidemon_tui::run_with_source;
