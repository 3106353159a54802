//! Background worker — all HTTP requests run off the main thread.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each
//! command is served on its own short-lived thread so the results and
//! performance fetch families proceed concurrently and never block each
//! other. There is no request cancellation: if the user re-triggers a fetch
//! before the previous one resolves, whichever response lands last wins.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use hindsight_core::{
    ApiError, BacktestApi, PerformanceMetrics, ResultsPage, ResultsQuery, RunRequest, RunSummary,
};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchResults {
        code: Option<String>,
        page: u32,
        limit: u32,
    },
    /// Fetch the overall snapshot, plus the per-code snapshot when a filter
    /// code is set.
    FetchPerformance {
        code: Option<String>,
    },
    RunBacktest {
        req: RunRequest,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    ResultsLoaded(ResultsPage),
    ResultsFailed(ApiError),
    PerformanceLoaded {
        overall: Option<PerformanceMetrics>,
        stock: Option<(String, PerformanceMetrics)>,
    },
    PerformanceFailed(ApiError),
    RunFinished(RunSummary),
    RunFailed(ApiError),
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    api: Arc<dyn BacktestApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("hindsight-worker".into())
        .spawn(move || {
            worker_loop(api, rx, tx);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    api: Arc<dyn BacktestApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                let api = api.clone();
                let tx = tx.clone();
                // Request threads are detached; a send after the TUI is gone
                // is silently dropped.
                thread::spawn(move || handle_command(cmd, api.as_ref(), &tx));
            }
        }
    }
}

fn handle_command(cmd: WorkerCommand, api: &dyn BacktestApi, tx: &Sender<WorkerResponse>) {
    match cmd {
        WorkerCommand::FetchResults { code, page, limit } => {
            let query = ResultsQuery {
                code,
                page: Some(page),
                limit: Some(limit),
            };
            let resp = match api.results(&query) {
                Ok(page) => WorkerResponse::ResultsLoaded(page),
                Err(e) => WorkerResponse::ResultsFailed(e),
            };
            let _ = tx.send(resp);
        }
        WorkerCommand::FetchPerformance { code } => {
            let resp = match fetch_performance(api, code) {
                Ok((overall, stock)) => WorkerResponse::PerformanceLoaded { overall, stock },
                Err(e) => WorkerResponse::PerformanceFailed(e),
            };
            let _ = tx.send(resp);
        }
        WorkerCommand::RunBacktest { req } => {
            let resp = match api.run(&req) {
                Ok(summary) => WorkerResponse::RunFinished(summary),
                Err(e) => WorkerResponse::RunFailed(e),
            };
            let _ = tx.send(resp);
        }
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

type PerformancePair = (
    Option<PerformanceMetrics>,
    Option<(String, PerformanceMetrics)>,
);

fn fetch_performance(
    api: &dyn BacktestApi,
    code: Option<String>,
) -> Result<PerformancePair, ApiError> {
    let overall = api.overall_performance()?;
    let stock = match code {
        Some(code) => api.stock_performance(&code)?.map(|m| (code, m)),
        None => None,
    };
    Ok((overall, stock))
}
