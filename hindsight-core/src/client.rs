//! HTTP client for the backtest evaluation service.
//!
//! The BacktestApi trait abstracts the three logical operations so the TUI
//! worker and tests can swap implementations. HttpBacktestClient is the real
//! one: blocking reqwest against a configured base URL.
//!
//! The performance endpoints return 404 before the first run has ever been
//! evaluated; that is "no data yet", not a failure, and maps to `Ok(None)`.
//! Every other non-success status propagates as an error.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::types::{PerformanceMetrics, ResultsPage, ResultsQuery, RunRequest, RunSummary};

/// Structured error types for API operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("server returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),
}

impl ApiError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e.to_string())
        } else {
            ApiError::NetworkUnreachable(e.to_string())
        }
    }
}

/// Error payload the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// The three logical operations of the evaluation service.
pub trait BacktestApi: Send + Sync {
    /// Trigger a server-side evaluation run. Returns the run summary counts.
    /// Fails by propagating the transport or server error unchanged.
    fn run(&self, req: &RunRequest) -> Result<RunSummary, ApiError>;

    /// Fetch one page of evaluated results. Unset query fields default to
    /// page 1, limit 20, no code filter. Errors always propagate.
    fn results(&self, query: &ResultsQuery) -> Result<ResultsPage, ApiError>;

    /// Aggregate metrics over all evaluated results, or None before any exist.
    fn overall_performance(&self) -> Result<Option<PerformanceMetrics>, ApiError>;

    /// Aggregate metrics for a single stock code, or None if it has no
    /// evaluated results yet.
    fn stock_performance(&self, code: &str) -> Result<Option<PerformanceMetrics>, ApiError>;
}

/// Blocking HTTP implementation of [`BacktestApi`].
pub struct HttpBacktestClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpBacktestClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decode a successful response, or turn a non-2xx status into
    /// [`ApiError::Status`] carrying the server's detail message when the
    /// body has one.
    fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::blocking::Response,
    ) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::status_error(resp));
        }
        resp.json::<T>()
            .map_err(|e| ApiError::ResponseFormatChanged(e.to_string()))
    }

    fn status_error(resp: reqwest::blocking::Response) -> ApiError {
        let status = resp.status().as_u16();
        let detail = resp
            .text()
            .ok()
            .and_then(|body| {
                serde_json::from_str::<ErrorBody>(&body)
                    .map(|e| e.detail)
                    .ok()
                    .or_else(|| (!body.is_empty()).then_some(body))
            })
            .unwrap_or_else(|| "no detail".to_string());
        ApiError::Status { status, detail }
    }

    /// Shared path for the two performance endpoints: 404 means the server
    /// has nothing evaluated yet, which is a valid empty state.
    fn fetch_performance(&self, path: &str) -> Result<Option<PerformanceMetrics>, ApiError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .map_err(ApiError::from_transport)?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(resp).map(Some)
    }
}

impl BacktestApi for HttpBacktestClient {
    fn run(&self, req: &RunRequest) -> Result<RunSummary, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/v1/backtest/run"))
            .json(req)
            .send()
            .map_err(ApiError::from_transport)?;
        Self::decode(resp)
    }

    fn results(&self, query: &ResultsQuery) -> Result<ResultsPage, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page().to_string()),
            ("limit", query.limit().to_string()),
        ];
        if let Some(code) = &query.code {
            params.push(("code", code.clone()));
        }

        let resp = self
            .client
            .get(self.url("/api/v1/backtest/results"))
            .query(&params)
            .send()
            .map_err(ApiError::from_transport)?;
        Self::decode(resp)
    }

    fn overall_performance(&self) -> Result<Option<PerformanceMetrics>, ApiError> {
        self.fetch_performance("/api/v1/backtest/performance")
    }

    fn stock_performance(&self, code: &str) -> Result<Option<PerformanceMetrics>, ApiError> {
        self.fetch_performance(&format!("/api/v1/backtest/performance/{code}"))
    }
}
