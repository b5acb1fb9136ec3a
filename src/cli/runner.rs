//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{FetchOptions, Paginator};
use crate::search::{CachedSearch, JiraSearchClient};
use serde_json::Value;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search {
                jql,
                order_by,
                no_order,
                limit,
                single_page,
                fields,
                start_at,
                no_cache,
            } => {
                let config = self.load_config()?;
                let mut options = FetchOptions::new()
                    .page_size(limit.unwrap_or(config.page_size))
                    .fetch_all(!single_page)
                    .start_at(*start_at)
                    .use_cache(!no_cache);
                options = if *no_order {
                    options.unordered()
                } else {
                    options.order_by(order_by.as_str())
                };
                if let Some(fields) = fields {
                    options = options.fields(fields.iter().cloned());
                }

                self.search(&config, jql, &options).await
            }
            Commands::Validate => self.validate(),
            Commands::Fields => self.fields(),
        }
    }

    /// Load the config file (if any), then environment and flag overrides
    fn load_config(&self) -> Result<JiraConfig> {
        let mut config = match &self.cli.config {
            Some(path) => JiraConfig::from_file(path)?,
            None => JiraConfig::default(),
        }
        .apply_env();

        if let Some(api_version) = self.cli.api_version {
            config.api_version = api_version;
        }

        Ok(config)
    }

    async fn search(&self, config: &JiraConfig, jql: &str, options: &FetchOptions) -> Result<()> {
        config.validate()?;

        let http = HttpClient::with_auth(config.http_config(), config.auth_config())?;
        let search = CachedSearch::new(
            JiraSearchClient::new(http, config.api_version),
            config.cache_ttl(),
        );
        let paginator = Paginator::new(search, config.fields.iter().cloned());

        debug!(server = %config.server, api = ?config.api_version, "Running search");
        let (issues, stats) = paginator.fetch_with_stats(jql, options).await?;
        info!(
            pages = stats.pages,
            skipped = stats.skipped,
            "Retrieved {} issues",
            issues.len()
        );

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_issues(&mut out, &issues, self.cli.format)
    }

    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;
        println!(
            "Configuration OK: {} (api {:?}, auth {})",
            config.server,
            config.api_version,
            config.auth_config().scheme()
        );
        Ok(())
    }

    fn fields(&self) -> Result<()> {
        let config = self.load_config()?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for field in &config.fields {
            writeln!(out, "{field}")?;
        }
        Ok(())
    }
}

/// Write issues in the requested format
pub(crate) fn write_issues<W: Write>(
    out: &mut W,
    issues: &[Value],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for issue in issues {
                let line = serde_json::to_string(issue)?;
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Pretty => {
            let rendered = serde_json::to_string_pretty(issues)?;
            writeln!(out, "{rendered}")?;
        }
    }
    out.flush().map_err(Error::from)
}
