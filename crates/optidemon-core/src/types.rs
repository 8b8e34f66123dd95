//! Core domain types: submitted code, generated artifacts and evaluation results

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Message shown when the submitted snippet is empty or whitespace-only.
pub const EMPTY_SOURCE_MESSAGE: &str = "Please enter code to optimize";

/// User-submitted snippet. Never empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCode(String);

impl SourceCode {
    /// Validate and trim raw editor text.
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::validation(EMPTY_SOURCE_MESSAGE));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generated test snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCase(pub String);

impl TestCase {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// One candidate rewrite. Index 0 of a variation list is the original code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variation(pub String);

impl Variation {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// Status of a single variation evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalStatus {
    Success,
    Error,
}

/// Outcome of running one variation against all test cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub status: EvalStatus,

    /// Mean execution time in seconds (success only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests_passed: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tests: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Code that was evaluated
    pub code: String,

    /// Index of the evaluated variation, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<usize>,
}

impl EvaluationResult {
    pub fn success(code: impl Into<String>, execution_time: f64, passed: u32, total: u32) -> Self {
        Self {
            status: EvalStatus::Success,
            execution_time: Some(execution_time),
            tests_passed: Some(passed),
            total_tests: Some(total),
            error: None,
            code: code.into(),
            variation: None,
        }
    }

    pub fn failure(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: EvalStatus::Error,
            execution_time: None,
            tests_passed: None,
            total_tests: None,
            error: Some(error.into()),
            code: code.into(),
            variation: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EvalStatus::Success
    }

    /// Footer rendered under this result's slot.
    pub fn footer(&self, fastest: bool) -> SlotFooter {
        match self.status {
            EvalStatus::Success => SlotFooter::Runtime {
                execution_time: self.execution_time.unwrap_or_default(),
                tests_passed: self.tests_passed.unwrap_or_default(),
                total_tests: self.total_tests.unwrap_or_default(),
                fastest,
            },
            EvalStatus::Error => SlotFooter::Failure {
                message: self.error.clone().unwrap_or_else(|| "Unknown error".to_string()),
            },
        }
    }
}

/// Full response of the evaluate stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// One result per variation, in variation order
    pub results: Vec<EvaluationResult>,

    /// Fastest successful result as picked by the backend
    #[serde(default)]
    pub best_variation: Option<EvaluationResult>,

    /// Setup code the backend extracted from the test cases
    #[serde(default)]
    pub test_data: Option<String>,
}

impl EvaluationReport {
    pub fn new(results: Vec<EvaluationResult>) -> Self {
        Self {
            results,
            best_variation: None,
            test_data: None,
        }
    }

    /// Index of the fastest successful result.
    ///
    /// Uses the backend's `best_variation` when it names an index, otherwise
    /// picks the lowest execution time among successful results.
    pub fn fastest_index(&self) -> Option<usize> {
        if let Some(index) = self.best_variation.as_ref().and_then(|b| b.variation) {
            if self.results.get(index).is_some_and(EvaluationResult::is_success) {
                return Some(index);
            }
        }

        self.results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_success())
            .filter_map(|(i, r)| r.execution_time.map(|t| (i, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering vocabulary
// ─────────────────────────────────────────────────────────────────────────────

/// Sections of the results area, in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    TestCases,
    Optimizations,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::TestCases => "Test Cases",
            SectionKind::Optimizations => "Optimizations",
        }
    }

    /// Label for slot `index` in this section.
    ///
    /// Test cases are numbered from 1. In the optimizations section index 0 is
    /// the unmodified submission and is always labeled "Original".
    pub fn slot_label(&self, index: usize) -> String {
        match self {
            SectionKind::TestCases => format!("Test {}", index + 1),
            SectionKind::Optimizations if index == 0 => "Original".to_string(),
            SectionKind::Optimizations => format!("Optimization {}", index),
        }
    }
}

/// Text shown beneath a result slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotFooter {
    Runtime {
        execution_time: f64,
        tests_passed: u32,
        total_tests: u32,
        fastest: bool,
    },
    Failure {
        message: String,
    },
}

impl SlotFooter {
    /// Display lines, one per paragraph in the original layout.
    pub fn lines(&self) -> Vec<String> {
        match self {
            SlotFooter::Runtime {
                execution_time,
                tests_passed,
                total_tests,
                fastest,
            } => {
                let mut runtime = format!("Runtime: {:.6}s", execution_time);
                if *fastest {
                    runtime.push_str("  (fastest)");
                }
                vec![runtime, format!("Tests: {}/{}", tests_passed, total_tests)]
            }
            SlotFooter::Failure { message } => vec![format!("Error: {}", message)],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SlotFooter::Failure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_code_rejects_blank_input() {
        for raw in ["", "   ", "\n\t  \n"] {
            let err = SourceCode::new(raw).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }));
            assert_eq!(err.user_message(), EMPTY_SOURCE_MESSAGE);
        }
    }

    #[test]
    fn test_source_code_is_trimmed() {
        let code = SourceCode::new("\n  def f(): pass  \n").unwrap();
        assert_eq!(code.as_str(), "def f(): pass");
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(SectionKind::Optimizations.slot_label(0), "Original");
        assert_eq!(SectionKind::Optimizations.slot_label(1), "Optimization 1");
        assert_eq!(SectionKind::Optimizations.slot_label(7), "Optimization 7");
        assert_eq!(SectionKind::TestCases.slot_label(0), "Test 1");
        assert_eq!(SectionKind::TestCases.slot_label(2), "Test 3");
    }

    #[test]
    fn test_evaluation_result_parses_success_shape() {
        let json = r#"{"status":"success","execution_time":0.0001,"tests_passed":1,"total_tests":1,"code":"def f(): pass"}"#;
        let result: EvaluationResult = serde_json::from_str(json).unwrap();
        assert!(result.is_success());
        assert_eq!(
            result.footer(false).lines(),
            vec!["Runtime: 0.000100s".to_string(), "Tests: 1/1".to_string()]
        );
    }

    #[test]
    fn test_evaluation_result_parses_error_shape_with_nulls() {
        let json = r#"{"status":"error","execution_time":null,"error":"SyntaxError","code":"def f():\n return","variation":1,"tests_passed":0,"total_tests":1}"#;
        let result: EvaluationResult = serde_json::from_str(json).unwrap();
        assert!(!result.is_success());
        assert_eq!(result.variation, Some(1));
        assert_eq!(result.footer(false).lines(), vec!["Error: SyntaxError"]);
    }

    #[test]
    fn test_fastest_prefers_backend_pick() {
        let mut best = EvaluationResult::success("b", 0.5, 1, 1);
        best.variation = Some(1);
        let report = EvaluationReport {
            results: vec![
                EvaluationResult::success("a", 0.1, 1, 1),
                EvaluationResult::success("b", 0.5, 1, 1),
            ],
            best_variation: Some(best),
            test_data: None,
        };
        assert_eq!(report.fastest_index(), Some(1));
    }

    #[test]
    fn test_fastest_computed_locally_when_backend_silent() {
        let report = EvaluationReport::new(vec![
            EvaluationResult::success("a", 0.3, 1, 1),
            EvaluationResult::failure("b", "boom"),
            EvaluationResult::success("c", 0.2, 1, 1),
        ]);
        assert_eq!(report.fastest_index(), Some(2));
    }

    #[test]
    fn test_fastest_none_when_everything_failed() {
        let report = EvaluationReport::new(vec![EvaluationResult::failure("a", "x")]);
        assert_eq!(report.fastest_index(), None);
    }

    #[test]
    fn test_fastest_marker_in_footer() {
        let footer = EvaluationResult::success("a", 1.0, 2, 3).footer(true);
        assert_eq!(footer.lines()[0], "Runtime: 1.000000s  (fastest)");
        assert_eq!(footer.lines()[1], "Tests: 2/3");
    }
}
