use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::config::{ApiConfig, QueryConfig};
use crate::error::FetchError;
use crate::http_client::authed_get;

const SNIPPET_CHARS: usize = 220;

/// Fetches the raw top scorers payload for the configured league and season.
///
/// Exactly one request is made. Failures are logged under their category
/// marker before being handed back, so callers only need to branch on them.
pub fn fetch_top_scorers(
    client: &Client,
    api: &ApiConfig,
    query: &QueryConfig,
) -> Result<Value, FetchError> {
    match request_payload(client, api, query) {
        Ok(value) => {
            info!(league = %query.league, season = %query.season, "fetched top scorers payload");
            Ok(value)
        }
        Err(err) => {
            error!("[{}]: {}", err.marker(), err);
            Err(err)
        }
    }
}

fn request_payload(
    client: &Client,
    api: &ApiConfig,
    query: &QueryConfig,
) -> Result<Value, FetchError> {
    let resp = authed_get(client, api)
        .query(&query.as_params())
        .send()
        .map_err(FetchError::from_reqwest)?;
    let status = resp.status();
    let body = resp.text().map_err(FetchError::from_reqwest)?;
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status,
            body: snippet(&body),
        });
    }
    serde_json::from_str::<Value>(body.trim())
        .map_err(|err| FetchError::Other(format!("invalid top scorers json: {err}")))
}

pub(crate) fn snippet(body: &str) -> String {
    body.trim()
        .replace(['\n', '\r'], " ")
        .chars()
        .take(SNIPPET_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::snippet;

    #[test]
    fn snippet_flattens_and_truncates() {
        assert_eq!(snippet("  bad\r\nrequest \n"), "bad  request");
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).len(), 220);
    }
}
