//! Solr client error types.
//!
//! Only failures that make a call unusable are errors. Field-level shape
//! mismatches inside documents are resolved by `FieldValue` defaults.

use thiserror::Error;

/// Errors that can occur while talking to the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolrError {
    /// Network or connection failure reported by the transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The payload is not valid for the declared wire format, or the
    /// mandatory response header is missing.
    #[error("Protocol decode error: {0}")]
    ProtocolDecode(String),

    /// The engine answered with a non-success HTTP status.
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request could not be turned into a wire exchange.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SolrError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a protocol decode error.
    pub fn protocol_decode(msg: impl Into<String>) -> Self {
        Self::ProtocolDecode(msg.into())
    }

    /// Create an HTTP status error.
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Whether the engine could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<quick_xml::Error> for SolrError {
    fn from(err: quick_xml::Error) -> Self {
        Self::ProtocolDecode(err.to_string())
    }
}

impl From<serde_json::Error> for SolrError {
    fn from(err: serde_json::Error) -> Self {
        Self::ProtocolDecode(err.to_string())
    }
}

impl From<reqwest::Error> for SolrError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
