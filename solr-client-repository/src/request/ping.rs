//! Ping request builder.

use solr_client_shared::WireFormat;

use crate::request::params::RequestParams;

/// Liveness check against the `/admin/ping` handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PingRequest {
    params: RequestParams,
    format: Option<WireFormat>,
}

impl PingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: WireFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub fn format(&self) -> Option<WireFormat> {
        self.format
    }
}
