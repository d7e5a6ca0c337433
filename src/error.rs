use reqwest::StatusCode;
use thiserror::Error;

/// Transport failures of the quota check and the scorer fetch.
///
/// Messages already carry the underlying error text, so no variant exposes it
/// again as a `source`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("connection failed: {0}")]
    Connection(reqwest::Error),

    #[error("http {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Other(String),
}

impl FetchError {
    pub fn marker(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "TIMEOUT ERROR",
            FetchError::Connection(_) => "CONNECTION ERROR",
            FetchError::HttpStatus { .. } => "HTTP ERROR",
            FetchError::Other(_) => "UNKNOWN ERROR",
        }
    }

    /// Sorts a reqwest failure into one of the transport categories.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout(err);
        }
        if err.is_connect() {
            return FetchError::Connection(err);
        }
        FetchError::Other(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("payload is not a json object")]
    NotAnObject,

    #[error("record {index}: missing field {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: field {field} is not an integer")]
    NotAnInteger { index: usize, field: &'static str },

    #[error("record {index}: invalid birth date {raw:?}")]
    BirthDate { index: usize, raw: String },

    #[error("record {index}: {message}")]
    Shape { index: usize, message: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("open database {path}: {err}")]
    Connect { path: String, err: rusqlite::Error },

    #[error("create top_scorers table: {0}")]
    Schema(rusqlite::Error),

    #[error("upsert top scorers: {0}")]
    Upsert(rusqlite::Error),

    #[error("read top scorers: {0}")]
    Load(rusqlite::Error),
}

impl StoreError {
    pub fn marker(&self) -> &'static str {
        match self {
            StoreError::Connect { .. } => "DATABASE CONNECTION ERROR",
            StoreError::Schema(_) => "CREATING TABLE ERROR",
            StoreError::Upsert(_) => "UPSERT ERROR",
            StoreError::Load(_) => "DATABASE READ ERROR",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_http_marker() {
        let err = FetchError::HttpStatus {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(err.marker(), "HTTP ERROR");
        assert_eq!(err.to_string(), "http 429 Too Many Requests: quota exceeded");
    }

    #[test]
    fn store_errors_do_not_repeat_the_sqlite_message() {
        let err = StoreError::Upsert(rusqlite::Error::InvalidQuery);
        let text = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(text.matches("Query is not read-only").count(), 1);
        assert!(text.starts_with("upsert top scorers: "));
    }

    #[test]
    fn other_error_is_unknown() {
        let err = FetchError::Other("bad body".to_string());
        assert_eq!(err.marker(), "UNKNOWN ERROR");
    }
}
