//! End-to-end pipeline tests: headless runner against a mock HTTP backend
//!
//! Run with: cargo test --test pipeline_e2e

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use optidemon::headless::runner::run_once;
use optidemon_app::clipboard::NullClipboard;
use optidemon_app::config::Settings;
use optidemon_app::Engine;
use optidemon_client::HttpRemoteService;
use optidemon_core::{PipelinePhase, RunOutcome, SectionKind, Stage};

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

fn engine_for(server: &MockServer, source: &str) -> Engine<HttpRemoteService> {
    let service = HttpRemoteService::new(&server.uri(), Duration::from_secs(2)).unwrap();
    let mut settings = Settings::default();
    settings.service.base_url = server.uri();
    settings.service.stage_timeout_secs = 5;
    Engine::new(service, settings, None, Some(source), Arc::new(NullClipboard))
}

/// Run once and return the outcome plus the parsed NDJSON lines.
async fn run(engine: &mut Engine<HttpRemoteService>) -> (RunOutcome, Vec<Value>) {
    let mut out = Vec::new();
    let outcome = run_once(engine, &mut out).await.unwrap();
    let events = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("invalid NDJSON line"))
        .collect();
    (outcome, events)
}

fn of_kind<'a>(events: &'a [Value], kind: &str) -> Vec<&'a Value> {
    events.iter().filter(|e| e["event"] == kind).collect()
}

async fn mount(server: &MockServer, endpoint: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_happy_path(server: &MockServer) {
    mount(
        server,
        "/generate_tests",
        200,
        json!({"testCases": ["assert f() is None"]}),
    )
    .await;
    mount(
        server,
        "/optimize",
        200,
        json!({"variations": ["def f(): pass", "def f():\n return"]}),
    )
    .await;
    mount(
        server,
        "/evaluate",
        200,
        json!({
            "results": [
                {"status": "success", "execution_time": 0.0001, "tests_passed": 1, "total_tests": 1, "code": "def f(): pass"},
                {"status": "error", "error": "SyntaxError", "code": "def f():\n return"}
            ]
        }),
    )
    .await;
}

// ─────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_successful_run_renders_tests_then_results() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;
    let mut engine = engine_for(&server, "def f(): pass");

    let (outcome, events) = run(&mut engine).await;

    assert_eq!(
        outcome,
        RunOutcome::Succeeded {
            test_cases: 1,
            variations: 2,
            fastest: Some(0),
        }
    );

    let slots = of_kind(&events, "slot_rendered");
    assert_eq!(slots.len(), 3);

    assert_eq!(slots[0]["section"], "test_cases");
    assert_eq!(slots[0]["label"], "Test 1");
    assert_eq!(slots[0]["text"], "assert f() is None");

    assert_eq!(slots[1]["section"], "optimizations");
    assert_eq!(slots[1]["label"], "Original");
    assert_eq!(slots[1]["text"], "def f(): pass");
    assert_eq!(slots[1]["footer"][0], "Runtime: 0.000100s  (fastest)");
    assert_eq!(slots[1]["footer"][1], "Tests: 1/1");

    assert_eq!(slots[2]["label"], "Optimization 1");
    assert_eq!(slots[2]["text"], "def f():\n return");
    assert_eq!(slots[2]["footer"], json!(["Error: SyntaxError"]));

    let phases: Vec<_> = of_kind(&events, "phase_changed")
        .iter()
        .map(|e| e["to"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        phases,
        vec!["generating_tests", "generating_optimizations", "evaluating", "success"]
    );

    let last = events.last().unwrap();
    assert_eq!(last["event"], "run_finished");
    assert_eq!(last["outcome"]["status"], "succeeded");

    assert_eq!(engine.workspace().snapshot().phase, PipelinePhase::Success);
    assert!(!engine.state.is_busy());
}

#[tokio::test]
async fn test_generate_tests_failure_shows_service_text() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/generate_tests",
        503,
        json!({"error": "model unavailable"}),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/optimize"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut engine = engine_for(&server, "def f(): pass");
    let (outcome, events) = run(&mut engine).await;

    assert_eq!(
        outcome,
        RunOutcome::Failed {
            stage: Some(Stage::GenerateTests),
            message: "model unavailable".into(),
        }
    );
    assert!(of_kind(&events, "slot_rendered").is_empty());
    let errors = of_kind(&events, "error");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], "model unavailable");
    assert_eq!(engine.workspace().error().as_deref(), Some("model unavailable"));
}

#[tokio::test]
async fn test_optimize_failure_keeps_test_slots() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/generate_tests",
        200,
        json!({"testCases": ["assert f() is None", "assert f() == None"]}),
    )
    .await;
    mount(&server, "/optimize", 500, json!({})).await;

    let mut engine = engine_for(&server, "def f(): pass");
    let (outcome, events) = run(&mut engine).await;

    assert!(matches!(
        outcome,
        RunOutcome::Failed {
            stage: Some(Stage::Optimize),
            ..
        }
    ));
    let errors = of_kind(&events, "error");
    assert_eq!(errors[0]["message"], "Failed to optimize code");

    let snapshot = engine.workspace().snapshot();
    assert_eq!(snapshot.results.slot_count(SectionKind::TestCases), 2);
    assert_eq!(snapshot.results.slot_count(SectionKind::Optimizations), 0);
    assert_eq!(snapshot.phase, PipelinePhase::Error);
}

#[tokio::test]
async fn test_blank_source_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut engine = engine_for(&server, "  \n\t");
    let (outcome, events) = run(&mut engine).await;

    assert!(matches!(outcome, RunOutcome::Failed { stage: None, .. }));
    assert_eq!(
        of_kind(&events, "error")[0]["message"],
        optidemon_core::EMPTY_SOURCE_MESSAGE
    );
    assert!(of_kind(&events, "phase_changed").is_empty());
}

#[tokio::test]
async fn test_rerun_after_failure_starts_fresh() {
    let server = MockServer::start().await;
    mount(&server, "/generate_tests", 500, json!({"error": "busy"})).await;
    let mut engine = engine_for(&server, "def f(): pass");
    let (first, _) = run(&mut engine).await;
    assert!(!first.is_success());

    server.reset().await;
    mount_happy_path(&server).await;
    let (second, events) = run(&mut engine).await;

    assert!(second.is_success());
    let phases = of_kind(&events, "phase_changed");
    assert_eq!(phases[0]["from"], "error");
    assert_eq!(phases[0]["to"], "idle");
    assert_eq!(phases[1]["to"], "generating_tests");
    assert!(engine.workspace().error().is_none());
}

#[tokio::test]
async fn test_large_run_prints_every_slot() {
    let server = MockServer::start().await;
    let tests: Vec<String> = (0..300).map(|i| format!("assert f() == {}", i)).collect();
    mount(&server, "/generate_tests", 200, json!({ "testCases": tests })).await;
    mount(&server, "/optimize", 200, json!({"variations": ["def f(): pass"]})).await;
    mount(
        &server,
        "/evaluate",
        200,
        json!({
            "results": [
                {"status": "success", "execution_time": 0.5, "tests_passed": 300, "total_tests": 300, "code": "def f(): pass"}
            ]
        }),
    )
    .await;

    let mut engine = engine_for(&server, "def f(): pass");
    let (outcome, events) = run(&mut engine).await;

    assert!(outcome.is_success());
    let slots = of_kind(&events, "slot_rendered");
    assert_eq!(slots.len(), 301);
    assert_eq!(slots[0]["label"], "Test 1");
    assert_eq!(slots[299]["label"], "Test 300");
    assert_eq!(slots[299]["text"], "assert f() == 299");
    assert_eq!(slots[300]["section"], "optimizations");
    assert_eq!(slots[300]["label"], "Original");
}
