use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::http_client::authed_get;

const DAILY_LIMIT: &str = "x-ratelimit-requests-limit";
const DAILY_REMAINING: &str = "x-ratelimit-requests-remaining";
const MINUTE_LIMIT: &str = "x-ratelimit-limit";
const MINUTE_REMAINING: &str = "x-ratelimit-remaining";

/// Rate-limit counters advertised by the API gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quota {
    pub daily_limit: Option<u32>,
    pub daily_remaining: Option<u32>,
    pub minute_limit: Option<u32>,
    pub minute_remaining: Option<u32>,
}

impl Quota {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            daily_limit: header_u32(headers, DAILY_LIMIT),
            daily_remaining: header_u32(headers, DAILY_REMAINING),
            minute_limit: header_u32(headers, MINUTE_LIMIT),
            minute_remaining: header_u32(headers, MINUTE_REMAINING),
        }
    }
}

pub fn inspect_quota(client: &Client, api: &ApiConfig) -> Result<Quota, FetchError> {
    let resp = authed_get(client, api)
        .send()
        .map_err(FetchError::from_reqwest)?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(FetchError::HttpStatus {
            status,
            body: crate::fetch::snippet(&body),
        });
    }

    let quota = Quota::from_headers(resp.headers());
    info!(
        daily_limit = ?quota.daily_limit,
        daily_remaining = ?quota.daily_remaining,
        minute_limit = ?quota.minute_limit,
        minute_remaining = ?quota.minute_remaining,
        "api quota"
    );
    Ok(quota)
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u32>().ok())
}
