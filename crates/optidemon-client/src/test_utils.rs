//! Scripted [`RemoteService`] for tests
//!
//! Replies are configured per stage up front. Unscripted stages answer with
//! an "echo" default: no tests, a single variation equal to the submitted
//! code, and one successful result per variation. Every call is recorded so
//! tests can assert ordering and that later stages never ran.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use optidemon_core::prelude::*;
use optidemon_core::{EvaluationReport, EvaluationResult, SourceCode, Stage, TestCase, Variation};

use crate::service::RemoteService;

/// A recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    GenerateTests { code: String },
    Optimize { code: String },
    Evaluate { variations: usize, test_cases: usize },
}

impl ServiceCall {
    pub fn stage(&self) -> Stage {
        match self {
            ServiceCall::GenerateTests { .. } => Stage::GenerateTests,
            ServiceCall::Optimize { .. } => Stage::Optimize,
            ServiceCall::Evaluate { .. } => Stage::Evaluate,
        }
    }
}

/// How a scripted stage should fail.
#[derive(Debug, Clone)]
pub enum ScriptedFailure {
    /// Service error with optional backend text
    Service(Option<String>),
    /// Transport error
    Transport(String),
    /// Never answer
    Hang,
}

#[derive(Debug, Default)]
struct Script {
    test_cases: Option<Vec<TestCase>>,
    variations: Option<Vec<Variation>>,
    report: Option<EvaluationReport>,
    failures: Vec<(Stage, ScriptedFailure)>,
    latency: Option<Duration>,
}

/// In-memory [`RemoteService`] with scripted replies and a call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedService {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<ServiceCall>>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test_cases<I, S>(self, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script.lock().unwrap().test_cases =
            Some(tests.into_iter().map(TestCase::new).collect());
        self
    }

    pub fn with_variations<I, S>(self, variations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script.lock().unwrap().variations =
            Some(variations.into_iter().map(Variation::new).collect());
        self
    }

    pub fn with_report(self, report: EvaluationReport) -> Self {
        self.script.lock().unwrap().report = Some(report);
        self
    }

    pub fn failing(self, stage: Stage, failure: ScriptedFailure) -> Self {
        self.script.lock().unwrap().failures.push((stage, failure));
        self
    }

    /// Delay every reply by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.script.lock().unwrap().latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, stage: Stage) -> usize {
        self.calls().iter().filter(|c| c.stage() == stage).count()
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn before_reply(&self, stage: Stage) -> Result<()> {
        let (latency, failure) = {
            let script = self.script.lock().unwrap();
            let failure = script
                .failures
                .iter()
                .find(|(s, _)| *s == stage)
                .map(|(_, f)| f.clone());
            (script.latency, failure)
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match failure {
            None => Ok(()),
            Some(ScriptedFailure::Service(message)) => Err(Error::service(stage, message)),
            Some(ScriptedFailure::Transport(message)) => Err(Error::transport(stage, message)),
            Some(ScriptedFailure::Hang) => std::future::pending().await,
        }
    }
}

impl RemoteService for ScriptedService {
    async fn generate_tests(&self, code: &SourceCode) -> Result<Vec<TestCase>> {
        self.record(ServiceCall::GenerateTests {
            code: code.as_str().to_string(),
        });
        self.before_reply(Stage::GenerateTests).await?;
        Ok(self
            .script
            .lock()
            .unwrap()
            .test_cases
            .clone()
            .unwrap_or_default())
    }

    async fn optimize(&self, code: &SourceCode) -> Result<Vec<Variation>> {
        self.record(ServiceCall::Optimize {
            code: code.as_str().to_string(),
        });
        self.before_reply(Stage::Optimize).await?;
        let scripted = self.script.lock().unwrap().variations.clone();
        Ok(scripted.unwrap_or_else(|| vec![Variation::new(code.as_str())]))
    }

    async fn evaluate(
        &self,
        variations: &[Variation],
        test_cases: &[TestCase],
    ) -> Result<EvaluationReport> {
        self.record(ServiceCall::Evaluate {
            variations: variations.len(),
            test_cases: test_cases.len(),
        });
        self.before_reply(Stage::Evaluate).await?;
        let scripted = self.script.lock().unwrap().report.clone();
        Ok(scripted.unwrap_or_else(|| {
            let total = test_cases.len() as u32;
            EvaluationReport::new(
                variations
                    .iter()
                    .map(|v| EvaluationResult::success(v.text(), 0.001, total, total))
                    .collect(),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_defaults() {
        let service = ScriptedService::new();
        let code = SourceCode::new("x = 1").unwrap();

        assert!(service.generate_tests(&code).await.unwrap().is_empty());
        let variations = service.optimize(&code).await.unwrap();
        assert_eq!(variations, vec![Variation::new("x = 1")]);
        let report = service.evaluate(&variations, &[]).await.unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].code, "x = 1");

        assert_eq!(service.calls().len(), 3);
        assert_eq!(service.call_count(Stage::Evaluate), 1);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let service = ScriptedService::new()
            .failing(Stage::Optimize, ScriptedFailure::Service(Some("nope".into())));
        let code = SourceCode::new("x").unwrap();

        let err = service.optimize(&code).await.unwrap_err();
        assert_eq!(err.user_message(), "nope");
        // The call is still recorded
        assert_eq!(service.call_count(Stage::Optimize), 1);
    }
}
