//! Pipeline lifecycle types: stages, phases and run outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three sequential remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    GenerateTests,
    Optimize,
    Evaluate,
}

impl Stage {
    /// All stages in dependency order.
    pub const ALL: [Stage; 3] = [Stage::GenerateTests, Stage::Optimize, Stage::Evaluate];

    /// Message shown when the stage fails without a usable service message.
    pub fn default_error(&self) -> &'static str {
        match self {
            Stage::GenerateTests => "Failed to generate tests",
            Stage::Optimize => "Failed to optimize code",
            Stage::Evaluate => "Failed to evaluate code",
        }
    }

    /// Route segment on the backend.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Stage::GenerateTests => "generate_tests",
            Stage::Optimize => "optimize",
            Stage::Evaluate => "evaluate",
        }
    }

    /// Pipeline phase entered while this stage is in flight.
    pub fn phase(&self) -> PipelinePhase {
        match self {
            Stage::GenerateTests => PipelinePhase::GeneratingTests,
            Stage::Optimize => PipelinePhase::GeneratingOptimizations,
            Stage::Evaluate => PipelinePhase::Evaluating,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Run lifecycle state.
///
/// ```text
/// Idle → GeneratingTests → GeneratingOptimizations → Evaluating → Success
///              │                    │                    │
///              └────────────────────┴────────────────────┴──→ Error
/// ```
///
/// `Success` and `Error` are terminal for a run and return to `Idle` when the
/// next run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    #[default]
    Idle,
    GeneratingTests,
    GeneratingOptimizations,
    Evaluating,
    Success,
    Error,
}

impl PipelinePhase {
    /// Whether a stage is in flight.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            PipelinePhase::GeneratingTests
                | PipelinePhase::GeneratingOptimizations
                | PipelinePhase::Evaluating
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelinePhase::Success | PipelinePhase::Error)
    }

    /// Legal edges of the run state machine.
    pub fn can_transition_to(&self, next: PipelinePhase) -> bool {
        use PipelinePhase::*;
        match (self, next) {
            (Idle, GeneratingTests) => true,
            (GeneratingTests, GeneratingOptimizations) => true,
            (GeneratingOptimizations, Evaluating) => true,
            (Evaluating, Success) => true,
            (GeneratingTests | GeneratingOptimizations | Evaluating, Error) => true,
            (Success | Error, Idle) => true,
            _ => false,
        }
    }

    /// Progress heading shown in the results area while a stage runs.
    pub fn progress_heading(&self) -> Option<&'static str> {
        match self {
            PipelinePhase::GeneratingTests => Some("Generating Test Cases..."),
            PipelinePhase::GeneratingOptimizations | PipelinePhase::Evaluating => {
                Some("Generating Optimizations...")
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PipelinePhase::Idle => "Idle",
            PipelinePhase::GeneratingTests => "Generating tests",
            PipelinePhase::GeneratingOptimizations => "Optimizing",
            PipelinePhase::Evaluating => "Evaluating",
            PipelinePhase::Success => "Done",
            PipelinePhase::Error => "Failed",
        }
    }
}

/// Terminal result of one `run()` invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// All three stages succeeded and both sections were rendered.
    Succeeded {
        test_cases: usize,
        variations: usize,
        /// Index of the fastest successful variation, if any succeeded.
        fastest: Option<usize>,
    },

    /// A stage failed or the input was rejected. `stage` is `None` for
    /// validation failures.
    Failed {
        stage: Option<Stage>,
        message: String,
    },

    /// Another run was already active; nothing happened.
    Rejected,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded { .. })
    }
}
