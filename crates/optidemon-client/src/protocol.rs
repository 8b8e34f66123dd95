//! Wire format of the stage endpoints
//!
//! All three endpoints take a JSON POST body and answer with JSON. A body
//! containing an `error` field is a failure regardless of status code.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use optidemon_core::prelude::*;
use optidemon_core::{Stage, TestCase, Variation};

/// Body of `generate_tests` and `optimize`.
#[derive(Debug, Serialize)]
pub struct CodeRequest<'a> {
    pub code: &'a str,
}

/// Body of `evaluate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest<'a> {
    pub variations: &'a [Variation],
    pub test_cases: &'a [TestCase],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestCasesResponse {
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariationsResponse {
    pub variations: Vec<Variation>,
}

/// Interpret the raw answer of a stage endpoint.
///
/// - An `error` field (any status) is a [`Error::Service`] carrying its text.
/// - A non-2xx status without one is a [`Error::Service`] with no text.
/// - A 2xx body that is not JSON, or lacks the expected fields, is a
///   [`Error::Transport`].
pub fn parse_stage_response<T: DeserializeOwned>(stage: Stage, status: u16, body: &str) -> Result<T> {
    let success = (200..300).contains(&status);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if success => {
            return Err(Error::transport(
                stage,
                format!("malformed response body: {}", e),
            ))
        }
        Err(_) => return Err(Error::service(stage, None)),
    };

    if let Some(message) = error_field(&value) {
        return Err(Error::service(stage, message));
    }

    if !success {
        return Err(Error::service(stage, None));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::transport(stage, format!("unexpected response shape: {}", e)))
}

/// `Some(text)` when the body carries a non-null `error` field.
///
/// The outer option says whether the field is present, the inner one whether
/// it had usable text.
fn error_field(value: &Value) -> Option<Option<String>> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(text) => Some(Some(text.clone())),
        other => Some(Some(other.to_string())),
    }
}
