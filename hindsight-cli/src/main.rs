//! Hindsight CLI — trigger runs and inspect results without the TUI.
//!
//! Commands:
//! - `run` — trigger an evaluation run on the server and print the summary
//! - `results` — print one page of evaluated results
//! - `performance` — print aggregate metrics, overall or for one code

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hindsight_core::{
    ApiConfig, BacktestApi, BacktestResultItem, HttpBacktestClient, PerformanceMetrics,
    ResultsQuery, RunRequest, RunSummary,
};

#[derive(Parser)]
#[command(
    name = "hindsight",
    about = "Hindsight CLI — advice backtest evaluation client"
)]
struct Cli {
    /// Base URL of the backtest service. Overrides config and environment.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a config TOML file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger an evaluation run on the server and print the summary counts.
    Run {
        /// Restrict the run to one stock code.
        #[arg(long)]
        code: Option<String>,

        /// Re-evaluate records that already have results.
        #[arg(long, default_value_t = false)]
        force: bool,

        /// Evaluation window in days.
        #[arg(long)]
        eval_window_days: Option<u32>,

        /// Maximum number of records to process.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Print one page of evaluated results.
    Results {
        /// Filter by stock code.
        #[arg(long)]
        code: Option<String>,

        /// Page number (1-based). Defaults to 1.
        #[arg(long)]
        page: Option<u32>,

        /// Rows per page. Defaults to 20.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Print aggregate metrics, overall or for one stock code.
    Performance {
        /// Stock code. Omit for the overall aggregate.
        code: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hindsight")
            .join("config.toml")
    });
    let mut config = ApiConfig::from_file(&config_path).with_env_override();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let client = HttpBacktestClient::new(&config);

    match cli.command {
        Commands::Run {
            code,
            force,
            eval_window_days,
            limit,
        } => run_cmd(&client, code, force, eval_window_days, limit),
        Commands::Results { code, page, limit } => results_cmd(&client, code, page, limit),
        Commands::Performance { code } => performance_cmd(&client, code),
    }
}

fn run_cmd(
    client: &HttpBacktestClient,
    code: Option<String>,
    force: bool,
    eval_window_days: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    let req = RunRequest {
        code,
        force,
        eval_window_days,
        limit,
    };
    let summary = client.run(&req)?;
    print_run_summary(&summary);
    Ok(())
}

fn results_cmd(
    client: &HttpBacktestClient,
    code: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    let query = ResultsQuery { code, page, limit };
    let page = client.results(&query)?;

    println!();
    println!("=== Backtest Results ===");
    println!(
        "Page {}/{} ({} total)",
        page.page,
        page.total_pages(),
        page.total
    );
    println!();
    println!(
        "{:<12} {:<8} {:<5} {:>8} {:<4} {:<9}",
        "Date", "Code", "Out", "Ret%", "Dir", "Status"
    );
    for item in &page.items {
        print_result_row(item);
    }
    Ok(())
}

fn print_result_row(item: &BacktestResultItem) {
    let outcome = item.outcome.map(|o| o.label()).unwrap_or("-");
    let ret = item
        .simulated_return_pct
        .map(|p| format!("{p:+.2}"))
        .unwrap_or_else(|| "-".to_string());
    let dir = match item.direction_correct {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    };
    println!(
        "{:<12} {:<8} {:<5} {:>8} {:<4} {:<9}",
        item.analysis_date,
        item.code,
        outcome,
        ret,
        dir,
        item.status.label()
    );
}

fn performance_cmd(client: &HttpBacktestClient, code: Option<String>) -> Result<()> {
    let metrics = match &code {
        Some(c) => client.stock_performance(c)?,
        None => client.overall_performance()?,
    };

    match metrics {
        Some(m) => print_performance(code.as_deref(), &m),
        None => println!("No performance data yet. Trigger a run first."),
    }
    Ok(())
}

fn print_run_summary(summary: &RunSummary) {
    println!();
    println!("=== Run Summary ===");
    println!("Processed:      {}", summary.processed);
    println!("Saved:          {}", summary.saved);
    println!("Completed:      {}", summary.completed);
    println!("Insufficient:   {}", summary.insufficient);
    println!("Errors:         {}", summary.errors);
}

fn print_performance(code: Option<&str>, m: &PerformanceMetrics) {
    println!();
    match code {
        Some(c) => println!("=== Performance: {c} ==="),
        None => println!("=== Performance: Overall ==="),
    }
    println!("Evaluated:      {} / {}", m.completed, m.total);
    println!("Accuracy:       {:.1}%", m.accuracy * 100.0);
    println!("Win Rate:       {:.1}%", m.win_rate * 100.0);
    println!("Avg Return:     {:+.2}%", m.avg_return_pct);
    println!("Avg Win:        {:+.2}%", m.avg_win_return_pct);
    println!("Avg Loss:       {:+.2}%", m.avg_loss_return_pct);
    println!(
        "W/L/N:          {} / {} / {}",
        m.wins, m.losses, m.neutrals
    );
    println!("Stop Loss Hit:  {:.0}%", m.stop_loss_rate * 100.0);
    println!("Take Profit Hit:{:.0}%", m.take_profit_rate * 100.0);
}
