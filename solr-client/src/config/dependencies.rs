//! Dependency initialization and wiring for the command line tool.

use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::CliError;
use solr_client_repository::config::DEFAULT_TIMEOUT;
use solr_client_repository::{HttpTransport, SolrClient, SolrClientConfig};
use solr_client_shared::WireFormat;

/// Default Solr base URL.
const DEFAULT_SOLR_URL: &str = "http://localhost:8983/solr";

/// Resolved connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub url: String,
    pub core: Option<String>,
    pub wire_format: WireFormat,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOLR_URL.to_string(),
            core: None,
            wire_format: WireFormat::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SOLR_URL`: Solr base URL (default: http://localhost:8983/solr)
    /// - `SOLR_CORE`: Core name prefixed to handler paths (default: none)
    /// - `SOLR_WIRE_FORMAT`: `xml` or `json` (default: xml)
    /// - `SOLR_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup("SOLR_URL").filter(|v| !v.trim().is_empty()) {
            settings.url = url;
        }
        settings.core = lookup("SOLR_CORE").filter(|v| !v.trim().is_empty());

        if let Some(format) = lookup("SOLR_WIRE_FORMAT") {
            settings.wire_format = format
                .parse()
                .map_err(|e| CliError::config(format!("SOLR_WIRE_FORMAT: {}", e)))?;
        }

        if let Some(secs) = lookup("SOLR_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    CliError::config(format!(
                        "SOLR_TIMEOUT_SECS must be a positive number of seconds, got {:?}",
                        secs
                    ))
                })?;
            settings.timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }

    /// Apply command line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        core: Option<String>,
        wire_format: Option<WireFormat>,
    ) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if core.is_some() {
            self.core = core;
        }
        if let Some(wire_format) = wire_format {
            self.wire_format = wire_format;
        }
        self
    }

    fn client_config(&self) -> SolrClientConfig {
        let config = SolrClientConfig::default()
            .with_wire_format(self.wire_format)
            .with_timeout(self.timeout);
        match &self.core {
            Some(core) => config.with_core(core.clone()),
            None => config,
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured client ready to send requests.
    pub client: SolrClient,
}

impl Dependencies {
    /// Build the HTTP transport and client for the given settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(CliError)` - If the transport cannot be created
    pub fn new(settings: &Settings) -> Result<Self, CliError> {
        info!(
            url = %settings.url,
            core = settings.core.as_deref().unwrap_or(""),
            wire_format = %settings.wire_format,
            timeout_secs = settings.timeout.as_secs(),
            "Initializing dependencies"
        );

        let config = settings.client_config();
        let transport = HttpTransport::new(&settings.url, config.timeout)
            .map_err(|e| CliError::config(format!("Failed to create Solr transport: {}", e)))?;

        let client = SolrClient::with_config(Arc::new(transport), config);

        Ok(Self { client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.url, "http://localhost:8983/solr");
    }

    #[test]
    fn test_reads_environment() {
        let settings = Settings::from_lookup(lookup(&[
            ("SOLR_URL", "http://solr:8983/solr"),
            ("SOLR_CORE", "books"),
            ("SOLR_WIRE_FORMAT", "JSON"),
            ("SOLR_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(settings.url, "http://solr:8983/solr");
        assert_eq!(settings.core.as_deref(), Some("books"));
        assert_eq!(settings.wire_format, WireFormat::Json);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_bad_values() {
        let format = Settings::from_lookup(lookup(&[("SOLR_WIRE_FORMAT", "csv")]));
        assert!(matches!(format, Err(CliError::ConfigError(_))));

        let timeout = Settings::from_lookup(lookup(&[("SOLR_TIMEOUT_SECS", "soon")]));
        assert!(matches!(timeout, Err(CliError::ConfigError(_))));

        let zero = Settings::from_lookup(lookup(&[("SOLR_TIMEOUT_SECS", "0")]));
        assert!(matches!(zero, Err(CliError::ConfigError(_))));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::from_lookup(lookup(&[("SOLR_CORE", "books")]))
            .unwrap()
            .with_overrides(None, Some("films".to_string()), Some(WireFormat::Json));

        assert_eq!(settings.url, DEFAULT_SOLR_URL);
        assert_eq!(settings.core.as_deref(), Some("films"));
        assert_eq!(settings.wire_format, WireFormat::Json);

        let config = settings.client_config();
        assert_eq!(config.core.as_deref(), Some("films"));
        assert_eq!(config.wire_format, WireFormat::Json);
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let settings = Settings::default().with_overrides(Some("::nope".to_string()), None, None);
        assert!(matches!(Dependencies::new(&settings), Err(CliError::ConfigError(_))));
    }
}
