//! Configuration types for the SolrClient.

use solr_client_shared::WireFormat;
use std::time::Duration;

/// Default timeout for a single exchange with the engine.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the SolrClient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrClientConfig {
    /// Core (index) name prefixed to every handler path.
    /// Set to None when the base URL already points at a core.
    pub core: Option<String>,
    /// Response format used when a request does not choose one.
    pub wire_format: WireFormat,
    /// Timeout applied by the HTTP transport.
    pub timeout: Duration,
}

impl Default for SolrClientConfig {
    fn default() -> Self {
        Self {
            core: None,
            wire_format: WireFormat::Xml,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SolrClientConfig {
    /// Create a config addressing a named core.
    pub fn for_core(core: impl Into<String>) -> Self {
        Self::default().with_core(core)
    }

    pub fn with_core(mut self, core: impl Into<String>) -> Self {
        self.core = Some(core.into());
        self
    }

    pub fn with_wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = wire_format;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
