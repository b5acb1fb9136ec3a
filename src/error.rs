//! Error types for issue-pager
//!
//! Every fallible API in the crate returns [`Result`]. Errors raised while
//! talking to Jira (HTTP, auth, decoding) are transport failures from the
//! paginator's point of view: they abort the run and reach the caller of
//! `fetch` unchanged.

use thiserror::Error;

/// The crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid YAML config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ------------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------------
    #[error("Credentials rejected before sending: {message}")]
    Auth { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jira returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited by Jira, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Unexpected search response: {message}")]
    Decode { message: String },

    #[error("Search failed: {message}")]
    Search { message: String },

    // ------------------------------------------------------------------------
    // Local I/O
    // ------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// A response that arrived but could not be used
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// A failure reported by a search collaborator outside the HTTP client
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search {
            message: message.into(),
        }
    }

    /// Whether another attempt of the same request may succeed
    ///
    /// Only the HTTP layer consults this; the paginator never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Whether the error came from the search call rather than local setup
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::RateLimited { .. }
                | Error::Timeout { .. }
                | Error::Auth { .. }
                | Error::Decode { .. }
                | Error::Search { .. }
        )
    }
}

/// Gateway and overload statuses, including the 52x codes Jira Cloud's edge returns
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504 | 520..=524)
}

pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error with what was being attempted
pub trait ResultExt<T> {
    fn context(self, message: impl Into<String>) -> Result<T>;

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        let message = message.into();
        self.with_context(|| message)
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::config("bad client").to_string(),
            "Configuration error: bad client"
        );
        assert_eq!(
            Error::missing_field("server").to_string(),
            "Missing required config field: server"
        );
        assert_eq!(
            Error::http_status(400, "Error in the JQL Query").to_string(),
            "Jira returned HTTP 400: Error in the JQL Query"
        );
        assert_eq!(
            Error::invalid_value("page_size", "must be positive").to_string(),
            "Invalid config value for 'page_size': must be positive"
        );
    }

    #[test_case(429, true)]
    #[test_case(500, true)]
    #[test_case(503, true)]
    #[test_case(522, true)]
    #[test_case(400, false)]
    #[test_case(401, false)]
    #[test_case(404, false)]
    fn test_status_retryable(status: u16, retryable: bool) {
        assert_eq!(Error::http_status(status, "").is_retryable(), retryable);
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::RateLimited {
            retry_after_seconds: 60
        }
        .is_retryable());
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(!Error::decode("not an object").is_retryable());
        assert!(!Error::config("test").is_retryable());
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::http_status(500, "").is_transport());
        assert!(Error::decode("not an object").is_transport());
        assert!(Error::auth("denied").is_transport());
        assert!(!Error::missing_field("server").is_transport());
        assert!(!Error::invalid_value("page_size", "zero").is_transport());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let err = result.context("outer").unwrap_err();
        assert_eq!(err.to_string(), "outer: Configuration error: inner");

        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = io.with_context(|| "reading jira.yaml".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "reading jira.yaml: IO error: gone");
    }
}
