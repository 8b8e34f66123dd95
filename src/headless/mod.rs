//! Headless mode - NDJSON event output instead of the TUI
//!
//! Runs one pipeline over a file and prints one JSON object per line, so
//! scripts can follow a run without parsing terminal escape codes.
//!
//! # Example Output
//!
//! ```json
//! {"event":"phase_changed","from":"idle","to":"generating_tests","timestamp":1704700001000}
//! {"event":"slot_rendered","section":"test_cases","index":0,"label":"Test 1","text":"assert f() is None","footer":[],"timestamp":1704700002000}
//! {"event":"run_finished","outcome":{"status":"succeeded","test_cases":1,"variations":1,"fastest":0},"timestamp":1704700003000}
//! ```

pub mod runner;

use std::io::Write;

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use optidemon_app::PipelineEvent;
use optidemon_core::{PipelinePhase, RunOutcome, SectionKind};

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    PhaseChanged {
        from: PipelinePhase,
        to: PipelinePhase,
        timestamp: i64,
    },

    /// A result slot received its text (and footer, if any)
    SlotRendered {
        section: SectionKind,
        index: usize,
        label: String,
        text: String,
        footer: Vec<String>,
        timestamp: i64,
    },

    /// Error banner shown
    Error { message: String, timestamp: i64 },

    RunFinished {
        outcome: RunOutcome,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Translate a workspace change into an output event.
    ///
    /// Clears and section openings carry nothing a consumer needs.
    pub fn from_pipeline(event: PipelineEvent) -> Option<Self> {
        let timestamp = Self::now();
        match event {
            PipelineEvent::PhaseChanged { from, to } => Some(Self::PhaseChanged {
                from,
                to,
                timestamp,
            }),
            PipelineEvent::SlotRendered {
                slot,
                label,
                text,
                footer,
            } => Some(Self::SlotRendered {
                section: slot.section,
                index: slot.index,
                label,
                text,
                footer: footer.map(|f| f.lines()).unwrap_or_default(),
                timestamp,
            }),
            PipelineEvent::ErrorShown { message } => Some(Self::Error { message, timestamp }),
            PipelineEvent::ResultsCleared | PipelineEvent::SectionOpened { .. } => None,
        }
    }

    pub fn run_finished(outcome: RunOutcome) -> Self {
        Self::RunFinished {
            outcome,
            timestamp: Self::now(),
        }
    }

    /// Write this event as one JSON line and flush.
    pub fn emit_to<W: Write>(&self, out: &mut W) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(out, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = out.flush() {
            error!("Failed to flush headless output: {}", e);
        }
    }

    /// Current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optidemon_app::SlotHandle;
    use optidemon_core::SlotFooter;

    fn to_json(event: &HeadlessEvent) -> serde_json::Value {
        let mut out = Vec::new();
        event.emit_to(&mut out);
        let line = String::from_utf8(out).unwrap();
        assert!(line.ends_with('\n'));
        serde_json::from_str(line.trim_end()).expect("invalid JSON")
    }

    #[test]
    fn test_phase_changed_serialization() {
        let event = HeadlessEvent::from_pipeline(PipelineEvent::PhaseChanged {
            from: PipelinePhase::Idle,
            to: PipelinePhase::GeneratingTests,
        })
        .unwrap();

        let value = to_json(&event);
        assert_eq!(value["event"], "phase_changed");
        assert_eq!(value["from"], "idle");
        assert_eq!(value["to"], "generating_tests");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_slot_rendered_carries_footer_lines() {
        let event = HeadlessEvent::from_pipeline(PipelineEvent::SlotRendered {
            slot: SlotHandle::new(SectionKind::Optimizations, 1),
            label: "Optimization 1".into(),
            text: "def f(): return 1".into(),
            footer: Some(SlotFooter::Failure {
                message: "SyntaxError".into(),
            }),
        })
        .unwrap();

        let value = to_json(&event);
        assert_eq!(value["event"], "slot_rendered");
        assert_eq!(value["section"], "optimizations");
        assert_eq!(value["index"], 1);
        assert_eq!(value["label"], "Optimization 1");
        assert_eq!(value["footer"][0], "Error: SyntaxError");
    }

    #[test]
    fn test_run_finished_outcome() {
        let value = to_json(&HeadlessEvent::run_finished(RunOutcome::Failed {
            stage: Some(optidemon_core::Stage::Optimize),
            message: "Failed to optimize code".into(),
        }));
        assert_eq!(value["event"], "run_finished");
        assert_eq!(value["outcome"]["status"], "failed");
        assert_eq!(value["outcome"]["message"], "Failed to optimize code");
    }

    #[test]
    fn test_bookkeeping_events_are_skipped() {
        assert!(HeadlessEvent::from_pipeline(PipelineEvent::ResultsCleared).is_none());
        assert!(HeadlessEvent::from_pipeline(PipelineEvent::SectionOpened {
            section: SectionKind::TestCases,
        })
        .is_none());
    }
}
