//! Small enums shared by config, transport and the CLI

use serde::{Deserialize, Serialize};

/// Which search endpoint a Jira deployment speaks
///
/// `V2` is the offset/total style (`/rest/api/2/search`), `V3` is the
/// continuation-token style (`/rest/api/3/search/jql`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Legacy offset pagination
    V2,
    /// Token pagination
    #[default]
    V3,
}

impl ApiVersion {
    /// Search endpoint path for this version
    pub fn search_path(self) -> &'static str {
        match self {
            ApiVersion::V2 => "/rest/api/2/search",
            ApiVersion::V3 => "/rest/api/3/search/jql",
        }
    }
}

/// How credentials from the config are presented to Jira
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Email (or username) plus API token / password
    #[default]
    Basic,
    /// Personal access token
    Bearer,
}

/// Growth of the delay between transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    Constant,
    Linear,
    #[default]
    Exponential,
}
