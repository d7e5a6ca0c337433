use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_API_BASE: &str = "https://api-football-v1.p.rapidapi.com/v3";
const DEFAULT_API_HOST: &str = "api-football-v1.p.rapidapi.com";
const DEFAULT_LEAGUE: &str = "39";
const DEFAULT_SEASON: &str = "2023";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const CACHE_DIR: &str = "topscorers_etl";
const DB_FILE: &str = "top_scorers.sqlite";

pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";
pub const API_HOST_HEADER: &str = "X-RapidAPI-Host";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub key: String,
    pub host: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn top_scorers_url(&self) -> String {
        format!("{}/players/topscorers", self.base_url.trim_end_matches('/'))
    }

    pub fn auth_headers(&self) -> [(&'static str, &str); 2] {
        [
            (API_KEY_HEADER, self.key.as_str()),
            (API_HOST_HEADER, self.host.as_str()),
        ]
    }
}

/// League and season the run asks the API for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub league: String,
    pub season: String,
}

impl QueryConfig {
    pub fn as_params(&self) -> [(&'static str, &str); 2] {
        [("league", self.league.as_str()), ("season", self.season.as_str())]
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub query: QueryConfig,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn new(api: ApiConfig, query: QueryConfig, database: DatabaseConfig) -> Self {
        Self {
            api,
            query,
            database,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| non_empty(lookup(key));

        let key = get("RAPIDAPI_KEY").ok_or(ConfigError::Missing("RAPIDAPI_KEY"))?;
        let host = get("RAPIDAPI_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let base_url = get("TOPSCORERS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let timeout_secs = match get("TOPSCORERS_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    key: "TOPSCORERS_HTTP_TIMEOUT_SECS",
                    value: raw.clone(),
                })?
                .clamp(1, 120),
            None => DEFAULT_TIMEOUT_SECS,
        };

        let league = get("TOPSCORERS_LEAGUE").unwrap_or_else(|| DEFAULT_LEAGUE.to_string());
        let season = get("TOPSCORERS_SEASON").unwrap_or_else(|| DEFAULT_SEASON.to_string());

        let path = get("TOPSCORERS_DB_PATH")
            .map(PathBuf::from)
            .or_else(|| default_db_path(get("XDG_CACHE_HOME"), get("HOME")))
            .ok_or(ConfigError::Missing("TOPSCORERS_DB_PATH"))?;

        Ok(Self {
            api: ApiConfig {
                base_url,
                key,
                host,
                timeout: Duration::from_secs(timeout_secs),
            },
            query: QueryConfig { league, season },
            database: DatabaseConfig { path },
        })
    }
}

/// `$XDG_CACHE_HOME/topscorers_etl/top_scorers.sqlite`, else under `~/.cache`.
fn default_db_path(xdg_cache_home: Option<String>, home: Option<String>) -> Option<PathBuf> {
    let dir = match xdg_cache_home {
        Some(base) => PathBuf::from(base),
        None => PathBuf::from(home?).join(".cache"),
    };
    Some(dir.join(CACHE_DIR).join(DB_FILE))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
