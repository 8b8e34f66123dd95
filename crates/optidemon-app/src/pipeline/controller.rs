//! The run: validate, then generate tests, optimize, evaluate
//!
//! ```text
//! run(raw)
//!   ├─ busy?            → Rejected
//!   ├─ blank input?     → error banner, Failed (no network)
//!   ├─ clear area, Idle → GeneratingTests
//!   ├─ generate_tests   → render "Test Cases"
//!   ├─ GeneratingOptimizations → optimize
//!   ├─ Evaluating       → evaluate
//!   └─ render "Optimizations" → Success
//! ```
//!
//! Any stage failure shows the error banner, moves to `Error` and skips the
//! remaining stages. Already rendered sections stay on screen.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use optidemon_client::RemoteService;
use optidemon_core::prelude::*;
use optidemon_core::{
    EvaluationReport, PipelinePhase, RunOutcome, SectionKind, SourceCode, Stage, TestCase,
    Variation,
};

use super::busy::{BusyFlag, BusyGuard};
use super::renderer::{render_slots, RatedResult};
use crate::surface::{DisplaySurface, StatusSurface};

/// Owns the run lifecycle for one remote service.
#[derive(Debug)]
pub struct PipelineController<S> {
    service: Arc<S>,
    busy: BusyFlag,
    stage_timeout: Option<Duration>,
    runs: AtomicU64,
}

impl<S> PipelineController<S>
where
    S: RemoteService + Sync,
{
    pub fn new(service: Arc<S>, busy: BusyFlag) -> Self {
        Self {
            service,
            busy,
            stage_timeout: None,
            runs: AtomicU64::new(0),
        }
    }

    /// Per-stage deadline. `None` waits forever.
    pub fn with_stage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stage_timeout = timeout;
        self
    }

    pub fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Start a run unless one is already active.
    pub async fn run<W>(&self, raw: &str, surface: &mut W) -> RunOutcome
    where
        W: DisplaySurface + StatusSurface + Send,
    {
        let Some(guard) = self.busy.try_acquire() else {
            info!("Run requested while another run is active; ignoring");
            return RunOutcome::Rejected;
        };
        self.run_with_guard(guard, raw, surface).await
    }

    /// Run with a busy guard the caller already holds.
    ///
    /// The guard is released when this returns or unwinds.
    pub async fn run_with_guard<W>(&self, guard: BusyGuard, raw: &str, surface: &mut W) -> RunOutcome
    where
        W: DisplaySurface + StatusSurface + Send,
    {
        let _guard = guard;
        let run_id = self.runs.fetch_add(1, Ordering::Relaxed) + 1;

        let code = match SourceCode::new(raw) {
            Ok(code) => code,
            Err(e) => {
                let message = e.user_message();
                info!(run = run_id, "Rejected input: {}", message);
                surface.show_error(&message);
                return RunOutcome::Failed {
                    stage: None,
                    message,
                };
            }
        };

        info!(run = run_id, "Starting run ({} bytes)", code.as_str().len());
        surface.clear();
        surface.clear_error();
        if surface.phase().is_terminal() {
            surface.set_phase(PipelinePhase::Idle);
        }

        match self.execute(run_id, &code, surface).await {
            Ok(outcome) => {
                surface.set_phase(PipelinePhase::Success);
                info!(run = run_id, "Run succeeded");
                outcome
            }
            Err(e) => {
                let message = e.user_message();
                error!(run = run_id, "Run failed: {}", e);
                surface.show_error(&message);
                surface.set_phase(PipelinePhase::Error);
                RunOutcome::Failed {
                    stage: e.stage(),
                    message,
                }
            }
        }
    }

    async fn execute<W>(&self, run_id: u64, code: &SourceCode, surface: &mut W) -> Result<RunOutcome>
    where
        W: DisplaySurface + StatusSurface + Send,
    {
        surface.set_phase(PipelinePhase::GeneratingTests);
        let test_cases: Vec<TestCase> = self
            .stage(run_id, Stage::GenerateTests, self.service.generate_tests(code))
            .await?;

        surface.open_section(SectionKind::TestCases);
        render_slots(surface, SectionKind::TestCases, &test_cases, |i| {
            SectionKind::TestCases.slot_label(i)
        });

        surface.set_phase(PipelinePhase::GeneratingOptimizations);
        let variations: Vec<Variation> = self
            .stage(run_id, Stage::Optimize, self.service.optimize(code))
            .await?;

        surface.set_phase(PipelinePhase::Evaluating);
        let report: EvaluationReport = self
            .stage(
                run_id,
                Stage::Evaluate,
                self.service.evaluate(&variations, &test_cases),
            )
            .await?;

        if report.results.len() != variations.len() {
            return Err(Error::transport(
                Stage::Evaluate,
                format!(
                    "expected {} results, got {}",
                    variations.len(),
                    report.results.len()
                ),
            ));
        }

        let fastest = report.fastest_index();
        let rated: Vec<RatedResult<'_>> = report
            .results
            .iter()
            .enumerate()
            .map(|(i, result)| RatedResult {
                result,
                fastest: fastest == Some(i),
            })
            .collect();

        surface.open_section(SectionKind::Optimizations);
        render_slots(surface, SectionKind::Optimizations, &rated, |i| {
            SectionKind::Optimizations.slot_label(i)
        });

        Ok(RunOutcome::Succeeded {
            test_cases: test_cases.len(),
            variations: variations.len(),
            fastest,
        })
    }

    /// Await one remote call under the stage deadline.
    async fn stage<T, F>(&self, run_id: u64, stage: Stage, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        debug!(run = run_id, "Stage {} started", stage);

        let result = match self.stage_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(Error::timeout(stage, limit.as_secs())),
            },
            None => call.await,
        };

        match &result {
            Ok(_) => debug!(run = run_id, "Stage {} finished", stage),
            Err(e) => warn!(run = run_id, "Stage {} failed: {}", stage, e),
        }
        result
    }
}
