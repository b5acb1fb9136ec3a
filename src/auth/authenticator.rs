//! Signs outgoing search requests

use super::types::AuthConfig;
use crate::error::{Error, Result};
use reqwest::RequestBuilder;

/// Applies one set of Jira credentials to every request
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Add the `Authorization` header, rejecting blank credentials up front
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Basic { username, password } => {
                if username.is_empty() {
                    return Err(Error::auth("basic auth requires a username"));
                }
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::Bearer { token } => {
                if token.is_empty() {
                    return Err(Error::auth("bearer auth requires a token"));
                }
                Ok(req.bearer_auth(token))
            }
        }
    }
}
