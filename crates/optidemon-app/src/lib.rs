//! optidemon-app - Application state and pipeline orchestration for optidemon
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the pipeline controller that sequences the three remote stages,
//! the results area those stages render into, configuration loading, and the
//! Engine abstraction shared by the TUI and headless runners.

pub mod actions;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod pipeline;
pub mod process;
pub mod results;
pub mod signals;
pub mod state;
pub mod surface;
pub mod workspace;

// Re-export primary types
pub use clipboard::ClipboardWriter;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use pipeline::{BusyFlag, BusyGuard, PipelineController};
pub use results::{CodeView, ResultsArea, Section, Slot};
pub use state::{AppState, Focus};
pub use surface::{DisplaySurface, SlotHandle, StatusSurface, ViewHandle};
pub use workspace::{PipelineEvent, SharedWorkspace, Workspace};
