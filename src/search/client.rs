//! Jira REST search client

use super::types::{IssueSearch, PageRequest};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::ApiVersion;
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Matches an existing `ORDER BY` clause in a JQL expression
static ORDER_BY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\border\s+by\b").unwrap());

/// Append `ORDER BY <order_by>` to a JQL expression
///
/// Left untouched when no sort key is given or the expression already sorts.
pub fn build_jql(jql: &str, order_by: Option<&str>) -> String {
    let jql = jql.trim();
    match order_by.map(str::trim) {
        Some(key) if !key.is_empty() && !ORDER_BY_REGEX.is_match(jql) => {
            format!("{jql} ORDER BY {key}")
        }
        _ => jql.to_string(),
    }
}

/// Search collaborator backed by the Jira REST API
#[derive(Debug)]
pub struct JiraSearchClient {
    http: HttpClient,
    api_version: ApiVersion,
}

impl JiraSearchClient {
    /// Create a client for the given endpoint flavour
    pub fn new(http: HttpClient, api_version: ApiVersion) -> Self {
        Self { http, api_version }
    }

    /// Endpoint flavour in use
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Query parameters for one search call
    pub fn request_config(&self, request: &PageRequest) -> RequestConfig {
        let mut config = RequestConfig::new()
            .query("jql", build_jql(&request.jql, request.order_by.as_deref()))
            .query("maxResults", request.max_results.to_string());

        if !request.fields.is_empty() {
            config = config.query("fields", request.fields.join(","));
        }

        match self.api_version {
            ApiVersion::V2 => config.query("startAt", request.start_at.to_string()),
            ApiVersion::V3 => match &request.page_token {
                Some(token) => config.query("nextPageToken", token),
                None => config,
            },
        }
    }
}

#[async_trait]
impl IssueSearch for JiraSearchClient {
    async fn search(&self, request: &PageRequest) -> Result<Value> {
        debug!(
            api = ?self.api_version,
            start_at = request.start_at,
            max_results = request.max_results,
            has_token = request.page_token.is_some(),
            "Searching issues"
        );

        let body: Value = self
            .http
            .get_json(self.api_version.search_path(), &self.request_config(request))
            .await?;

        if !body.is_object() {
            return Err(Error::decode(format!(
                "expected a JSON object from {}, got {}",
                self.api_version.search_path(),
                json_kind(&body)
            )));
        }

        Ok(body)
    }

    /// Keyed on the endpoint and query actually sent, so a `startAt` that V3
    /// drops does not split the cache
    fn cache_key(&self, request: &PageRequest) -> Result<String> {
        let config = self.request_config(request);
        let query: BTreeMap<&str, &str> = config
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        Ok(serde_json::to_string(&(self.api_version.search_path(), query))?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
