//! The remote stage seam
//!
//! Both the HTTP client and the scripted test double implement this trait.
//! The application layer is generic over it so pipelines can be exercised
//! without a network.

use optidemon_core::prelude::*;
use optidemon_core::{EvaluationReport, SourceCode, TestCase, Variation};

/// Three request/response operations of the optimization backend.
///
/// Every operation may fail with [`Error::Service`], [`Error::Transport`] or
/// [`Error::Timeout`] tagged with its [`Stage`](optidemon_core::Stage).
#[trait_variant::make(RemoteService: Send)]
pub trait LocalRemoteService {
    /// Stage 1: generate test snippets for the submitted code
    async fn generate_tests(&self, code: &SourceCode) -> Result<Vec<TestCase>>;

    /// Stage 2: propose rewrites. Index 0 of the result is the original code.
    async fn optimize(&self, code: &SourceCode) -> Result<Vec<Variation>>;

    /// Stage 3: run every variation against every test case
    async fn evaluate(
        &self,
        variations: &[Variation],
        test_cases: &[TestCase],
    ) -> Result<EvaluationReport>;
}
