//! Pipeline orchestration
//!
//! - `busy`: single-run guard with guaranteed release
//! - `renderer`: positional artifact-to-slot rendering
//! - `controller`: the ordered generate / optimize / evaluate run

pub mod busy;
pub mod controller;
pub mod renderer;

pub use busy::{BusyFlag, BusyGuard};
pub use controller::PipelineController;
pub use renderer::{render_slots, RatedResult, SlotContent};
