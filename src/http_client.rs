use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::USER_AGENT;

use crate::config::ApiConfig;

const USER_AGENT_VALUE: &str = concat!("topscorers-etl/", env!("CARGO_PKG_VERSION"));

pub fn http_client(api: &ApiConfig) -> Result<Client> {
    Client::builder()
        .timeout(api.timeout)
        .build()
        .context("failed to build http client")
}

/// GET against the top scorers endpoint with the auth headers attached.
pub fn authed_get(client: &Client, api: &ApiConfig) -> RequestBuilder {
    let mut req = client
        .get(api.top_scorers_url())
        .header(USER_AGENT, USER_AGENT_VALUE);
    for (name, value) in api.auth_headers() {
        req = req.header(name, value);
    }
    req
}
