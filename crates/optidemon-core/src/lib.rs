//! # optidemon-core - Core Domain Types
//!
//! Foundation crate for optidemon. Provides the domain vocabulary of the
//! generate-tests / optimize / evaluate workflow, error handling and logging.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`SourceCode`] - Validated, non-empty submission
//! - [`TestCase`], [`Variation`] - Artifacts produced by the first two stages
//! - [`EvaluationResult`], [`EvaluationReport`] - Output of the evaluate stage
//! - [`SectionKind`], [`SlotFooter`] - Results-area vocabulary and label policy
//!
//! ### Pipeline (`pipeline`)
//! - [`Stage`] - The three remote operations, in dependency order
//! - [`PipelinePhase`] - Run state machine
//! - [`RunOutcome`] - Terminal result of one run
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum covering validation, service, transport and render failures
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use optidemon_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod prelude;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use pipeline::{PipelinePhase, RunOutcome, Stage};
pub use types::{
    EvalStatus, EvaluationReport, EvaluationResult, SectionKind, SlotFooter, SourceCode,
    TestCase, Variation, EMPTY_SOURCE_MESSAGE,
};
