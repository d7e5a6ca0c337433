use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use topscorers_etl::config::Config;
use topscorers_etl::pipeline::{self, FetchStage, PersistStage, QuotaStage, RunReport};

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("[CONFIG ERROR]: {err}");
            return ExitCode::FAILURE;
        }
    };

    match pipeline::run(&config) {
        Ok(report) => {
            print_report(&report);
            if report.succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!("top scorers run aborted: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &RunReport) {
    match &report.quota {
        QuotaStage::Reported(q) => println!(
            "Quota: daily {}/{} minute {}/{}",
            show(q.daily_remaining),
            show(q.daily_limit),
            show(q.minute_remaining),
            show(q.minute_limit)
        ),
        QuotaStage::Failed(err) => println!("Quota: unavailable ({err})"),
    }

    match &report.fetch {
        FetchStage::Fetched { records, skipped } => {
            println!("Scorers fetched: {records} (skipped {skipped})")
        }
        FetchStage::NoData { skipped } => {
            println!("No data available or an error occurred (skipped {skipped})")
        }
        FetchStage::Failed(err) => println!("Fetch failed: [{}] {err}", err.marker()),
    }

    match &report.persist {
        PersistStage::Skipped => println!("Database: skipped"),
        PersistStage::ConnectFailed(err) => println!("Database: [{}] {err}", err.marker()),
        PersistStage::Upserted { rows, schema_error } => {
            println!("Rows inserted or updated: {rows}");
            if let Some(err) = schema_error {
                println!("  schema warning: {err}");
            }
        }
    }
}

fn show(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "n/a".to_string())
}
