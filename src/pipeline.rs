use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Local;
use reqwest::blocking::Client;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{FetchError, StoreError};
use crate::fetch::fetch_top_scorers;
use crate::http_client::http_client;
use crate::normalize::{ScorerRecord, normalize};
use crate::quota::{Quota, inspect_quota};
use crate::ranking::rank;
use crate::store;
use crate::table;

#[derive(Debug)]
pub enum QuotaStage {
    Reported(Quota),
    Failed(FetchError),
}

#[derive(Debug)]
pub enum FetchStage {
    Fetched { records: usize, skipped: usize },
    NoData { skipped: usize },
    Failed(FetchError),
}

#[derive(Debug)]
pub enum PersistStage {
    /// Nothing to write; the database was not touched.
    Skipped,
    ConnectFailed(StoreError),
    Upserted {
        rows: usize,
        schema_error: Option<StoreError>,
    },
}

#[derive(Debug)]
pub struct RunReport {
    pub quota: QuotaStage,
    pub fetch: FetchStage,
    pub persist: PersistStage,
    pub ranked: Vec<ScorerRecord>,
}

impl RunReport {
    /// False when the fetch or the database connection failed. A failed quota
    /// check or an empty feed still counts as a clean run.
    pub fn succeeded(&self) -> bool {
        !matches!(self.fetch, FetchStage::Failed(_))
            && !matches!(self.persist, PersistStage::ConnectFailed(_))
    }
}

/// Runs the pipeline once, printing the ranked table to stdout.
pub fn run(config: &Config) -> Result<RunReport> {
    let client = http_client(&config.api)?;
    run_with_client(&client, config, &mut io::stdout().lock())
}

/// Runs quota check, fetch, normalize, rank and upsert once, in that order.
///
/// The ranked table is written to `table_out` before the database is touched.
/// Transport and connection failures are folded into the report. Malformed
/// payloads and upsert failures end the run with an error.
pub fn run_with_client(
    client: &Client,
    config: &Config,
    table_out: &mut impl Write,
) -> Result<RunReport> {
    let quota = match inspect_quota(client, &config.api) {
        Ok(quota) => QuotaStage::Reported(quota),
        Err(err) => {
            error!("[{}]: quota check failed: {}", err.marker(), err);
            QuotaStage::Failed(err)
        }
    };

    let (fetch, ranked) = match fetch_top_scorers(client, &config.api, &config.query) {
        Err(err) => (FetchStage::Failed(err), Vec::new()),
        Ok(payload) => {
            let normalized = normalize(&payload, Local::now().naive_local())
                .context("normalize top scorers payload")?;
            let skipped = normalized.skipped.len();
            if normalized.is_empty() {
                (FetchStage::NoData { skipped }, Vec::new())
            } else {
                let records = normalized.records.len();
                (
                    FetchStage::Fetched { records, skipped },
                    rank(normalized.records),
                )
            }
        }
    };

    if ranked.is_empty() {
        warn!("no data available or an error occurred");
        return Ok(RunReport {
            quota,
            fetch,
            persist: PersistStage::Skipped,
            ranked,
        });
    }
    info!(scorers = ranked.len(), "ranked top scorers");
    writeln!(table_out, "{}", table::render(&ranked)).context("write ranked table")?;

    let persist = match store::connect(&config.database) {
        Err(err) => PersistStage::ConnectFailed(err),
        Ok(mut conn) => {
            // A schema failure is reported but the upsert is still attempted.
            let schema_error = store::ensure_schema(&conn).err();
            let rows = store::upsert_scorers(&mut conn, &ranked)?;
            PersistStage::Upserted { rows, schema_error }
        }
    };

    Ok(RunReport {
        quota,
        fetch,
        persist,
        ranked,
    })
}
