//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.
//! Every user action that needs the network reduces to one of three worker
//! commands; every state change comes from a key event or a worker response.
//!
//! Fetch lifecycles are tracked independently: the run action moves
//! idle → running → (success | error), while the results and performance
//! families each carry their own loading flag. A fetch failure never clears
//! previously loaded data — the panel keeps showing its last known state and
//! the failure lands in the status bar and error history.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use hindsight_core::{
    ApiError, BacktestResultItem, PerformanceMetrics, RunRequest, RunSummary,
};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Results page size. The server default, mirrored here so pagination math
/// works before the first response arrives.
pub const PAGE_LIMIT: u32 = 20;

/// Which panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Run,
    Results,
    Performance,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Run => 0,
            Panel::Results => 1,
            Panel::Performance => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Run),
            1 => Some(Panel::Results),
            2 => Some(Panel::Performance),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Run => "Run",
            Panel::Results => "Results",
            Panel::Performance => "Performance",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Api => "API",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn from_api_error(e: &ApiError) -> Self {
        match e {
            ApiError::NetworkUnreachable(_) | ApiError::Timeout(_) => ErrorCategory::Network,
            _ => ErrorCategory::Api,
        }
    }
}

/// Run panel state — trigger parameters plus the last run's outcome banner.
pub struct RunPanelState {
    pub eval_window_days: u32,
    pub batch_limit: Option<u32>,
    pub force: bool,
    pub cursor: usize,
    pub in_progress: bool,
    pub last_summary: Option<RunSummary>,
    pub last_error: Option<String>,
}

impl RunPanelState {
    pub fn new() -> Self {
        Self {
            eval_window_days: 30,
            batch_limit: None,
            force: false,
            cursor: 0,
            in_progress: false,
            last_summary: None,
            last_error: None,
        }
    }

    /// Number of configurable settings: eval window, batch limit, force.
    pub fn setting_count(&self) -> usize {
        3
    }
}

/// Results panel state — one server page plus cursor/scroll within it.
pub struct ResultsPanelState {
    pub items: Vec<BacktestResultItem>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub loading: bool,
    pub cursor: usize,
}

impl ResultsPanelState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            limit: PAGE_LIMIT,
            loading: false,
            cursor: 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        hindsight_core::types::total_pages(self.total, self.limit)
    }
}

/// Performance side panel state.
pub struct PerformancePanelState {
    pub overall: Option<PerformanceMetrics>,
    pub stock: Option<(String, PerformanceMetrics)>,
    pub loading: bool,
    /// False until the first snapshot (or confirmed "no data") arrives.
    pub loaded_once: bool,
}

impl PerformancePanelState {
    pub fn new() -> Self {
        Self {
            overall: None,
            stock: None,
            loading: false,
            loaded_once: false,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Filter,
    Detail(usize), // index into results items
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    /// The active stock-code filter, applied to both fetch families.
    pub filter_code: Option<String>,

    // Panel states
    pub run: RunPanelState,
    pub results: ResultsPanelState,
    pub performance: PerformancePanelState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub filter_input: String,

    #[allow(dead_code)]
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            active_panel: Panel::Results,
            running: true,
            filter_code: None,
            run: RunPanelState::new(),
            results: ResultsPanelState::new(),
            performance: PerformancePanelState::new(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            filter_input: String::new(),
            state_path,
        }
    }

    // ----- actions ---------------------------------------------------------

    /// Initial fetches: results page 1 without filter state reset, plus the
    /// performance snapshot. Both families proceed concurrently.
    pub fn fetch_initial(&mut self) {
        self.fetch_results(1);
        self.fetch_performance();
    }

    /// Request one results page with the active filter.
    pub fn fetch_results(&mut self, page: u32) {
        self.results.loading = true;
        let _ = self.worker_tx.send(WorkerCommand::FetchResults {
            code: self.filter_code.clone(),
            page,
            limit: self.results.limit,
        });
    }

    /// Request the performance snapshot (overall, plus per-code when a
    /// filter is active).
    pub fn fetch_performance(&mut self) {
        self.performance.loading = true;
        let _ = self.worker_tx.send(WorkerCommand::FetchPerformance {
            code: self.filter_code.clone(),
        });
    }

    /// Apply a new filter: reset to page 1 and re-fetch both families.
    /// An empty code clears the filter.
    pub fn submit_filter(&mut self, code: Option<String>) {
        self.filter_code = code;
        self.results.cursor = 0;
        self.fetch_results(1);
        self.fetch_performance();
        match &self.filter_code {
            Some(code) => self.set_status(format!("Filter: {code}")),
            None => self.set_status("Filter cleared"),
        }
    }

    /// Trigger an evaluation run with the current parameters and filter.
    pub fn start_run(&mut self) {
        if self.run.in_progress {
            self.set_warning("A run is already in progress");
            return;
        }
        self.run.in_progress = true;
        self.run.last_error = None;
        let req = RunRequest {
            code: self.filter_code.clone(),
            force: self.run.force,
            eval_window_days: Some(self.run.eval_window_days),
            limit: self.run.batch_limit,
        };
        let _ = self.worker_tx.send(WorkerCommand::RunBacktest { req });
        self.set_status("Evaluation run started...");
    }

    /// Move `delta` pages, clamped to the valid range. Keeps the active
    /// filter; fetches only the results list.
    pub fn change_page(&mut self, delta: i64) {
        let pages = self.results.total_pages() as i64;
        let target = (self.results.page as i64 + delta).clamp(1, pages) as u32;
        if target != self.results.page {
            self.results.cursor = 0;
            self.fetch_results(target);
        }
    }

    // ----- worker responses ------------------------------------------------

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::ResultsLoaded(page) => {
                self.results.loading = false;
                self.results.total = page.total;
                self.results.page = page.page;
                self.results.limit = page.limit;
                self.results.items = page.items;
                if self.results.cursor >= self.results.items.len() {
                    self.results.cursor = self.results.items.len().saturating_sub(1);
                }
            }
            WorkerResponse::ResultsFailed(e) => {
                // Prior items stay on screen; the failure is surfaced, not fatal.
                self.results.loading = false;
                self.push_error(
                    ErrorCategory::from_api_error(&e),
                    format!("Results fetch failed: {e}"),
                    "results".into(),
                );
            }
            WorkerResponse::PerformanceLoaded { overall, stock } => {
                self.performance.loading = false;
                self.performance.loaded_once = true;
                self.performance.overall = overall;
                self.performance.stock = stock;
            }
            WorkerResponse::PerformanceFailed(e) => {
                self.performance.loading = false;
                self.push_error(
                    ErrorCategory::from_api_error(&e),
                    format!("Performance fetch failed: {e}"),
                    "performance".into(),
                );
            }
            WorkerResponse::RunFinished(summary) => {
                self.run.in_progress = false;
                self.run.last_summary = Some(summary);
                self.set_status(format!(
                    "Run complete: {} processed, {} completed, {} insufficient, {} errors",
                    summary.processed, summary.completed, summary.insufficient, summary.errors
                ));
                self.refresh_after_run();
            }
            WorkerResponse::RunFailed(e) => {
                self.run.in_progress = false;
                self.run.last_error = Some(e.to_string());
                self.push_error(
                    ErrorCategory::from_api_error(&e),
                    format!("Run failed: {e}"),
                    "run".into(),
                );
                // The run may have partially evaluated before failing, so the
                // refresh happens regardless of outcome.
                self.refresh_after_run();
            }
        }
    }

    /// Unconditional refresh after a run: results back to page 1 and a fresh
    /// performance snapshot, both under the current filter.
    fn refresh_after_run(&mut self) {
        self.results.cursor = 0;
        self.fetch_results(1);
        self.fetch_performance();
    }

    // ----- cross-cutting ---------------------------------------------------

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hindsight_core::ResultsPage;
    use std::sync::mpsc::{self, Receiver};

    fn test_app() -> (AppState, Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let app = AppState::new(cmd_tx, resp_rx, PathBuf::from("."));
        (app, cmd_rx)
    }

    fn drain(rx: &Receiver<WorkerCommand>) -> Vec<WorkerCommand> {
        let mut cmds = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            cmds.push(cmd);
        }
        cmds
    }

    fn loaded_page(total: u64, page: u32) -> WorkerResponse {
        WorkerResponse::ResultsLoaded(ResultsPage {
            total,
            page,
            limit: PAGE_LIMIT,
            items: Vec::new(),
        })
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Run.next(), Panel::Results);
        assert_eq!(Panel::Help.next(), Panel::Run);
        assert_eq!(Panel::Run.prev(), Panel::Help);
    }

    #[test]
    fn initial_fetch_requests_page_1_and_performance() {
        let (mut app, cmd_rx) = test_app();
        app.fetch_initial();

        let cmds = drain(&cmd_rx);
        assert_eq!(cmds.len(), 2);
        match &cmds[0] {
            WorkerCommand::FetchResults { code, page, limit } => {
                assert!(code.is_none());
                assert_eq!(*page, 1);
                assert_eq!(*limit, PAGE_LIMIT);
            }
            other => panic!("expected FetchResults, got {other:?}"),
        }
        match &cmds[1] {
            WorkerCommand::FetchPerformance { code } => assert!(code.is_none()),
            other => panic!("expected FetchPerformance, got {other:?}"),
        }
        assert!(app.results.loading);
        assert!(app.performance.loading);
    }

    #[test]
    fn filter_submit_resets_to_page_1_and_refetches_both() {
        let (mut app, cmd_rx) = test_app();
        app.handle_response(loaded_page(45, 3));
        assert_eq!(app.results.page, 3);

        app.submit_filter(Some("AAPL".into()));
        let cmds = drain(&cmd_rx);
        assert_eq!(cmds.len(), 2);
        match &cmds[0] {
            WorkerCommand::FetchResults { code, page, .. } => {
                assert_eq!(code.as_deref(), Some("AAPL"));
                assert_eq!(*page, 1);
            }
            other => panic!("expected FetchResults, got {other:?}"),
        }
        match &cmds[1] {
            WorkerCommand::FetchPerformance { code } => {
                assert_eq!(code.as_deref(), Some("AAPL"));
            }
            other => panic!("expected FetchPerformance, got {other:?}"),
        }
    }

    #[test]
    fn run_completion_refreshes_results_and_performance_with_active_filter() {
        let (mut app, cmd_rx) = test_app();
        app.filter_code = Some("AAPL".into());
        app.start_run();

        let cmds = drain(&cmd_rx);
        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            WorkerCommand::RunBacktest { req } => {
                assert_eq!(req.code.as_deref(), Some("AAPL"));
                assert_eq!(req.eval_window_days, Some(30));
            }
            other => panic!("expected RunBacktest, got {other:?}"),
        }
        assert!(app.run.in_progress);

        app.handle_response(WorkerResponse::RunFinished(RunSummary {
            processed: 5,
            saved: 5,
            completed: 4,
            insufficient: 1,
            errors: 0,
        }));
        assert!(!app.run.in_progress);
        assert!(app.run.last_summary.is_some());

        let cmds = drain(&cmd_rx);
        assert_eq!(cmds.len(), 2);
        match &cmds[0] {
            WorkerCommand::FetchResults { code, page, .. } => {
                assert_eq!(code.as_deref(), Some("AAPL"));
                assert_eq!(*page, 1);
            }
            other => panic!("expected FetchResults, got {other:?}"),
        }
        assert!(matches!(
            &cmds[1],
            WorkerCommand::FetchPerformance { code } if code.as_deref() == Some("AAPL")
        ));
    }

    #[test]
    fn run_failure_surfaces_message_and_still_refreshes() {
        let (mut app, cmd_rx) = test_app();
        app.start_run();
        drain(&cmd_rx);

        app.handle_response(WorkerResponse::RunFailed(ApiError::Status {
            status: 503,
            detail: "scheduler busy".into(),
        }));
        assert!(!app.run.in_progress);
        assert!(app.run.last_error.as_deref().unwrap().contains("503"));
        assert_eq!(app.error_history.len(), 1);

        let cmds = drain(&cmd_rx);
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn page_change_keeps_filter_and_fetches_only_results() {
        let (mut app, cmd_rx) = test_app();
        app.filter_code = Some("AAPL".into());
        app.handle_response(loaded_page(45, 2));
        drain(&cmd_rx);

        app.change_page(1);
        let cmds = drain(&cmd_rx);
        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            WorkerCommand::FetchResults { code, page, .. } => {
                assert_eq!(code.as_deref(), Some("AAPL"));
                assert_eq!(*page, 3);
            }
            other => panic!("expected FetchResults, got {other:?}"),
        }
    }

    #[test]
    fn page_change_clamps_to_valid_range() {
        let (mut app, cmd_rx) = test_app();
        app.handle_response(loaded_page(45, 3)); // 3 pages of 20
        drain(&cmd_rx);

        // Already on the last page; moving forward is a no-op.
        app.change_page(1);
        assert!(drain(&cmd_rx).is_empty());

        app.change_page(-10);
        let cmds = drain(&cmd_rx);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(
            &cmds[0],
            WorkerCommand::FetchResults { page: 1, .. }
        ));
    }

    #[test]
    fn fetch_failure_keeps_prior_items() {
        let (mut app, _cmd_rx) = test_app();
        app.handle_response(WorkerResponse::ResultsLoaded(ResultsPage {
            total: 1,
            page: 1,
            limit: PAGE_LIMIT,
            items: vec![sample_item()],
        }));
        assert_eq!(app.results.items.len(), 1);

        app.handle_response(WorkerResponse::ResultsFailed(
            ApiError::NetworkUnreachable("connection refused".into()),
        ));
        assert_eq!(app.results.items.len(), 1);
        assert!(!app.results.loading);
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Error))
        ));
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _cmd_rx) = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    fn sample_item() -> BacktestResultItem {
        serde_json::from_str(
            r#"{
                "code": "AAPL",
                "analysis_date": "2025-02-11",
                "advice": "Buy",
                "outcome": "win",
                "simulated_return_pct": 3.0,
                "status": "completed"
            }"#,
        )
        .unwrap()
    }
}
