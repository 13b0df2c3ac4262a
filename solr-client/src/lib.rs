//! # Solr Client
//!
//! Entry point library for the `solr` command line tool.
//!
//! This crate resolves configuration from the environment, wires the HTTP
//! transport into a [`SolrClient`](solr_client_repository::SolrClient), and
//! maps command line subcommands onto client operations.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;

pub use commands::{Cli, Command, OutputMode};
pub use config::{Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur while configuring or running the command line tool.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error returned by the Solr client.
    #[error("Solr error: {0}")]
    SolrError(#[from] solr_client_repository::SolrError),

    /// JSON input or output error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
