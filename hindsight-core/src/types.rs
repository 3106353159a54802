//! Wire types for the backtest evaluation API.
//!
//! Every entity here is an immutable snapshot deserialized from the server's
//! snake_case JSON. Conversion between wire naming and typed fields happens
//! once, at this boundary, via serde — nothing downstream touches raw JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classification of a completed backtest: did the advice pay off?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Neutral,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
            Outcome::Neutral => "NEUT",
        }
    }
}

/// Whether enough historical data existed to evaluate a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalStatus {
    Completed,
    Insufficient,
    Error,
}

impl EvalStatus {
    pub fn label(self) -> &'static str {
        match self {
            EvalStatus::Completed => "completed",
            EvalStatus::Insufficient => "insufficient",
            EvalStatus::Error => "error",
        }
    }
}

/// Parameters for triggering a server-side evaluation run.
///
/// Unset fields are omitted from the request body so the server applies its
/// own defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_window_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Counts returned by a triggered run — a summary, never a row list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub processed: u64,
    pub saved: u64,
    pub completed: u64,
    pub insufficient: u64,
    pub errors: u64,
}

/// One evaluated historical analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResultItem {
    pub code: String,
    pub analysis_date: NaiveDate,
    #[serde(default)]
    pub advice: String,
    /// Whether the predicted direction matched the realized move.
    /// Absent for incomplete evaluations.
    #[serde(default)]
    pub direction_correct: Option<bool>,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    /// Simulated return over the evaluation window, in percent.
    #[serde(default)]
    pub simulated_return_pct: Option<f64>,
    #[serde(default)]
    pub stop_loss_hit: bool,
    #[serde(default)]
    pub take_profit_hit: bool,
    pub status: EvalStatus,
}

/// One page of the results listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsPage {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub items: Vec<BacktestResultItem>,
}

impl ResultsPage {
    /// Number of pages at this page size. At least 1 even when empty, so
    /// pagination controls always have a valid range.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }
}

pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    (total.div_ceil(limit as u64) as u32).max(1)
}

/// Query parameters for the results listing. Unset fields take the server's
/// documented defaults: page 1, limit 20, no code filter.
#[derive(Debug, Clone, Default)]
pub struct ResultsQuery {
    pub code: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ResultsQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(20)
    }
}

/// Aggregate statistics over a set of evaluated results.
///
/// Rates are fractions in `0.0..=1.0`; returns are percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total: u64,
    pub completed: u64,
    pub accuracy: f64,
    pub win_rate: f64,
    pub avg_return_pct: f64,
    #[serde(default)]
    pub avg_win_return_pct: f64,
    #[serde(default)]
    pub avg_loss_return_pct: f64,
    #[serde(default)]
    pub stop_loss_rate: f64,
    #[serde(default)]
    pub take_profit_rate: f64,
    #[serde(default)]
    pub wins: u64,
    #[serde(default)]
    pub losses: u64,
    #[serde(default)]
    pub neutrals: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn result_item_parses_wire_fields() {
        let json = r#"{
            "code": "AAPL",
            "analysis_date": "2025-03-05",
            "advice": "Buy on momentum breakout",
            "direction_correct": true,
            "outcome": "win",
            "simulated_return_pct": 4.2,
            "stop_loss_hit": false,
            "take_profit_hit": true,
            "status": "completed"
        }"#;
        let item: BacktestResultItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.code, "AAPL");
        assert_eq!(item.outcome, Some(Outcome::Win));
        assert_eq!(item.direction_correct, Some(true));
        assert!(item.take_profit_hit);
        assert_eq!(item.status, EvalStatus::Completed);
        assert_eq!(
            item.analysis_date,
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
        );
    }

    #[test]
    fn incomplete_item_parses_without_outcome_fields() {
        let json = r#"{
            "code": "005930",
            "analysis_date": "2025-03-05",
            "status": "insufficient"
        }"#;
        let item: BacktestResultItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.outcome, None);
        assert_eq!(item.simulated_return_pct, None);
        assert_eq!(item.status, EvalStatus::Insufficient);
    }

    #[test]
    fn run_request_omits_unset_fields() {
        let body = serde_json::to_value(RunRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));

        let body = serde_json::to_value(RunRequest {
            code: Some("AAPL".into()),
            force: true,
            eval_window_days: Some(30),
            limit: None,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"code": "AAPL", "force": true, "eval_window_days": 30})
        );
    }

    #[test]
    fn query_defaults() {
        let q = ResultsQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 20);
        assert!(q.code.is_none());
    }

    #[test]
    fn total_pages_edge_cases() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(5, 0), 1);
    }

    proptest! {
        #[test]
        fn total_pages_covers_all_rows(total in 0u64..100_000, limit in 1u32..500) {
            let pages = total_pages(total, limit);
            prop_assert!(pages >= 1);
            // every row fits in the computed page count
            prop_assert!(pages as u64 * limit as u64 >= total);
            // and the last page is not empty (unless there are no rows)
            if total > 0 {
                prop_assert!((pages as u64 - 1) * (limit as u64) < total);
            }
        }
    }
}
