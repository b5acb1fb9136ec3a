//! Configuration for talking to a Jira deployment
//!
//! Loaded from a YAML or JSON file, optionally overridden from the
//! environment, then turned into auth and HTTP client settings.

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{ApiVersion, AuthMethod};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default field projection used when a search does not name its own
///
/// Read-only; callers always receive copies.
pub const DEFAULT_FIELDS: &[&str] = &[
    "key",
    "summary",
    "status",
    "issuetype",
    "priority",
    "assignee",
    "reporter",
    "created",
    "updated",
    "labels",
    "components",
    "fixVersions",
    "resolution",
];

/// Environment variable overriding `server`
pub const ENV_SERVER: &str = "JIRA_SERVER";
/// Environment variable overriding `user`
pub const ENV_USER: &str = "JIRA_USER";
/// Environment variable overriding `password`
pub const ENV_PASSWORD: &str = "JIRA_PASSWORD";

/// Everything needed to reach and page through a Jira instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL, e.g. `https://example.atlassian.net`
    #[serde(default)]
    pub server: String,

    /// Account name or email
    #[serde(default)]
    pub user: Option<String>,

    /// Password, API token or personal access token
    #[serde(default)]
    pub password: Option<String>,

    /// How credentials are sent
    #[serde(default)]
    pub auth_method: AuthMethod,

    /// Which search endpoint to call
    #[serde(default)]
    pub api_version: ApiVersion,

    /// Default field projection
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Records per search call
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// How long cached search responses stay valid
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Transport-level retries for a single search call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Client-side request rate
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|f| (*f).to_string()).collect()
}

fn default_page_size() -> u32 {
    100
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_requests_per_second() -> u32 {
    10
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            user: None,
            password: None,
            auth_method: AuthMethod::default(),
            api_version: ApiVersion::default(),
            fields: default_fields(),
            page_size: default_page_size(),
            cache_ttl_seconds: default_cache_ttl(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl JiraConfig {
    /// Load from a file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Parse YAML
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Parse JSON
    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Override connection settings from `JIRA_*` environment variables
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override connection settings from any key lookup
    #[must_use]
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(server) = lookup(ENV_SERVER) {
            self.server = server;
        }
        if let Some(user) = lookup(ENV_USER) {
            self.user = Some(user);
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = Some(password);
        }
        self
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(Error::missing_field("server"));
        }

        let url = url::Url::parse(self.server.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "server",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        match self.auth_method {
            AuthMethod::Basic => {
                if !has(&self.user) {
                    return Err(Error::missing_field("user"));
                }
                if !has(&self.password) {
                    return Err(Error::missing_field("password"));
                }
            }
            AuthMethod::Bearer => {
                if !has(&self.password) {
                    return Err(Error::missing_field("password"));
                }
            }
        }

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }

        Ok(())
    }

    /// Credentials as an auth config
    pub fn auth_config(&self) -> AuthConfig {
        let password = self.password.clone().unwrap_or_default();
        match self.auth_method {
            AuthMethod::Basic => match &self.user {
                Some(user) => AuthConfig::Basic {
                    username: user.clone(),
                    password,
                },
                None => AuthConfig::None,
            },
            AuthMethod::Bearer => AuthConfig::Bearer { token: password },
        }
    }

    /// Transport settings
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(self.server.trim().trim_end_matches('/'))
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .rate_limit(RateLimiterConfig::per_second(self.requests_per_second))
            .build()
    }

    /// Cache lifetime
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    const YAML: &str = r"
server: https://example.atlassian.net/
user: me@example.com
password: api-token
api_version: v2
fields: [key, summary]
page_size: 50
";

    #[test]
    fn test_parse_yaml_with_defaults() {
        let config = JiraConfig::from_yaml_str(YAML).unwrap();

        assert_eq!(config.server, "https://example.atlassian.net/");
        assert_eq!(config.user.as_deref(), Some("me@example.com"));
        assert_eq!(config.auth_method, AuthMethod::Basic);
        assert_eq!(config.api_version, ApiVersion::V2);
        assert_eq!(config.fields, vec!["key", "summary"]);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.max_retries, 3);
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_fields_use_default_projection() {
        let config = JiraConfig::from_yaml_str("server: https://jira.local").unwrap();
        assert_eq!(config.fields, default_fields());
        assert_eq!(config.api_version, ApiVersion::V3);
    }

    #[test]
    fn test_from_file_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("config.yaml");
        std::fs::File::create(&yaml_path)
            .unwrap()
            .write_all(YAML.as_bytes())
            .unwrap();
        let from_yaml = JiraConfig::from_file(&yaml_path).unwrap();

        let json_path = dir.path().join("config.json");
        std::fs::write(&json_path, serde_json::to_string(&from_yaml).unwrap()).unwrap();
        let from_json = JiraConfig::from_file(&json_path).unwrap();

        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn test_from_file_missing() {
        let err = JiraConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_validate_errors() {
        let config = JiraConfig::default();
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfigField { ref field }) if field == "server"
        ));

        let config = JiraConfig {
            server: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = JiraConfig {
            server: "ftp://jira.local".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));

        let config = JiraConfig {
            server: "https://jira.local".to_string(),
            user: Some("me".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfigField { ref field }) if field == "password"
        ));

        let config = JiraConfig {
            server: "https://jira.local".to_string(),
            auth_method: AuthMethod::Bearer,
            password: Some("pat".to_string()),
            page_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { ref field, .. }) if field == "page_size"
        ));
    }

    #[test]
    fn test_auth_config() {
        let config = JiraConfig::from_yaml_str(YAML).unwrap();
        assert!(matches!(
            config.auth_config(),
            AuthConfig::Basic { ref username, ref password }
                if username == "me@example.com" && password == "api-token"
        ));

        let config = JiraConfig {
            auth_method: AuthMethod::Bearer,
            password: Some("pat".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.auth_config(), AuthConfig::Bearer { ref token } if token == "pat"));

        assert!(matches!(JiraConfig::default().auth_config(), AuthConfig::None));
    }

    #[test]
    fn test_http_config() {
        let config = JiraConfig::from_yaml_str(YAML).unwrap();
        let http = config.http_config();

        assert_eq!(
            http.base_url.as_deref(),
            Some("https://example.atlassian.net")
        );
        assert_eq!(http.timeout, Duration::from_secs(30));
        assert_eq!(http.max_retries, 3);
        assert_eq!(http.rate_limit.map(|r| r.requests_per_second), Some(10));
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_SERVER, "https://override.local"),
            (ENV_USER, ""),
            (ENV_PASSWORD, "secret"),
        ]
        .into_iter()
        .collect();

        let config = JiraConfig::from_yaml_str(YAML)
            .unwrap()
            .apply_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.server, "https://override.local");
        assert_eq!(config.user.as_deref(), Some("me@example.com"));
        assert_eq!(config.password.as_deref(), Some("secret"));
    }
}
