//! HTTP implementation of [`RemoteService`]

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use optidemon_core::prelude::*;
use optidemon_core::{EvaluationReport, SourceCode, Stage, TestCase, Variation};

use crate::protocol::{
    parse_stage_response, CodeRequest, EvaluateRequest, TestCasesResponse, VariationsResponse,
};
use crate::service::RemoteService;

/// JSON-over-HTTP client for the optimization backend.
///
/// Each stage is a POST to `{base_url}/{stage}`. There is no overall request
/// timeout here; per-stage deadlines are enforced by the pipeline controller.
#[derive(Debug, Clone)]
pub struct HttpRemoteService {
    client: Client,
    base_url: Url,
}

impl HttpRemoteService {
    /// Create a client for `base_url`.
    ///
    /// Fails with [`Error::ConfigInvalid`] if the URL does not parse or is not
    /// http(s).
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url.trim()).map_err(|e| Error::ConfigInvalid {
            message: format!("invalid service URL '{}': {}", base_url, e),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::ConfigInvalid {
                message: format!("service URL must be http or https, got '{}'", base_url),
            });
        }

        // Url::join replaces the last path segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, stage: Stage) -> Result<Url> {
        self.base_url
            .join(stage.endpoint())
            .map_err(|e| Error::transport(stage, format!("invalid endpoint URL: {}", e)))
    }

    async fn post<B, T>(&self, stage: Stage, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(stage)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::transport(stage, e.to_string()))?;

        self.handle_response(stage, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        stage: Stage,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(stage, format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!("{} returned HTTP {}", stage, status.as_u16());
        }

        parse_stage_response(stage, status.as_u16(), &body)
    }
}

impl RemoteService for HttpRemoteService {
    async fn generate_tests(&self, code: &SourceCode) -> Result<Vec<TestCase>> {
        let response: TestCasesResponse = self
            .post(
                Stage::GenerateTests,
                &CodeRequest {
                    code: code.as_str(),
                },
            )
            .await?;
        Ok(response.test_cases)
    }

    async fn optimize(&self, code: &SourceCode) -> Result<Vec<Variation>> {
        let response: VariationsResponse = self
            .post(
                Stage::Optimize,
                &CodeRequest {
                    code: code.as_str(),
                },
            )
            .await?;
        Ok(response.variations)
    }

    async fn evaluate(
        &self,
        variations: &[Variation],
        test_cases: &[TestCase],
    ) -> Result<EvaluationReport> {
        self.post(
            Stage::Evaluate,
            &EvaluateRequest {
                variations,
                test_cases,
            },
        )
        .await
    }
}
