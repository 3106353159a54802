//! Hindsight Core — typed access to the remote backtest evaluation service.
//!
//! The service evaluates historical stock advice against subsequent price
//! movement and exposes three operations over JSON/HTTP:
//! - trigger an evaluation run (a batch job; returns counts, not rows)
//! - list evaluated results, paginated and optionally filtered by stock code
//! - fetch an aggregate performance snapshot (overall or per stock)
//!
//! All simulation happens server-side. This crate owns the wire types, the
//! blocking HTTP client, and the configuration layer shared by the TUI and
//! the CLI.

pub mod client;
pub mod config;
pub mod types;

pub use client::{ApiError, BacktestApi, HttpBacktestClient};
pub use config::ApiConfig;
pub use types::{
    BacktestResultItem, EvalStatus, Outcome, PerformanceMetrics, ResultsPage, ResultsQuery,
    RunRequest, RunSummary,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything crossing the TUI worker channel is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<types::BacktestResultItem>();
        require_sync::<types::BacktestResultItem>();
        require_send::<types::ResultsPage>();
        require_sync::<types::ResultsPage>();
        require_send::<types::PerformanceMetrics>();
        require_sync::<types::PerformanceMetrics>();
        require_send::<types::RunSummary>();
        require_sync::<types::RunSummary>();
        require_send::<client::ApiError>();
        require_sync::<client::ApiError>();
        require_send::<client::HttpBacktestClient>();
        require_sync::<client::HttpBacktestClient>();
    }
}
