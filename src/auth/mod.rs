//! Authentication module
//!
//! Supports: Basic (Jira Cloud email + API token) and Bearer (Data Center
//! personal access tokens).

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
