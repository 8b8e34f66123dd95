//! # optidemon-client - Remote Stage Client
//!
//! Talks to the backend that generates tests, proposes optimized rewrites and
//! evaluates them. The three operations are exposed through the
//! [`RemoteService`] trait so the application layer can run against the real
//! HTTP backend or a scripted fake.
//!
//! Depends on [`optidemon_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Service Seam
//! - [`RemoteService`] - `generate_tests`, `optimize`, `evaluate`
//!
//! ### HTTP Implementation
//! - [`HttpRemoteService`] - JSON-over-HTTP POST client built on reqwest
//!
//! ### Wire Protocol
//! - [`parse_stage_response()`] - Map a status code and body to a stage result
//!
//! ### Test Helpers (`test-helpers` feature)
//! - `ScriptedService` - In-memory service with scripted replies and a call log

pub mod http;
pub mod protocol;
pub mod service;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Public API re-exports
pub use http::HttpRemoteService;
pub use protocol::{parse_stage_response, CodeRequest, EvaluateRequest};
pub use service::{LocalRemoteService, RemoteService};
