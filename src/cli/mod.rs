//! CLI module
//!
//! Command-line interface over the paginator.
//!
//! # Commands
//!
//! - `search` - Run a JQL query and print every matching issue
//! - `validate` - Check the configuration file
//! - `fields` - Show the default field projection

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
