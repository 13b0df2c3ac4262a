//! Transport trait definition.
//!
//! The client never opens connections itself. It hands a fully serialized
//! [`WireRequest`] to a `SolrTransport` and receives the raw status and
//! payload bytes back.

use async_trait::async_trait;
use solr_client_shared::WireFormat;
use std::fmt;

use crate::errors::SolrError;
use crate::request::{OperationKind, RequestBody, RequestParams};

/// HTTP method of a wire exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A request ready to be put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// The operation this exchange performs.
    pub kind: OperationKind,
    pub method: HttpMethod,
    /// Path relative to the server base URL, e.g. `/books/select`.
    pub path: String,
    /// Parameters including `wt`.
    pub params: RequestParams,
    pub body: Option<RequestBody>,
    /// The format the payload will be decoded with.
    pub format: WireFormat,
}

impl WireRequest {
    /// Path plus percent-encoded query string.
    pub fn path_and_query(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.params.to_query_string())
        }
    }
}

/// Raw reply from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    /// Payload bytes exactly as received.
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The payload as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Abstract HTTP exchange with the engine.
///
/// Implementations own connection handling, TLS, timeouts and any retry
/// policy. They must return the payload bytes unchanged so multi-byte text
/// survives decoding.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so one client can serve
/// concurrent callers.
#[async_trait]
pub trait SolrTransport: Send + Sync {
    /// Perform one exchange.
    ///
    /// # Returns
    ///
    /// * `Ok(WireResponse)` - Whatever status the engine answered with
    /// * `Err(SolrError::Transport)` - If the engine could not be reached
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, SolrError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_query() {
        let mut params = RequestParams::new();
        params.set("q", "title:café").set("wt", "json");
        let request = WireRequest {
            kind: OperationKind::Query,
            method: HttpMethod::Get,
            path: "/select".to_string(),
            params,
            body: None,
            format: WireFormat::Json,
        };

        assert_eq!(request.path_and_query(), "/select?q=title%3Acaf%C3%A9&wt=json");
    }

    #[test]
    fn test_wire_response_status() {
        let ok = WireResponse {
            status: 200,
            body: "日本人".as_bytes().to_vec(),
        };
        assert!(ok.is_success());
        assert_eq!(ok.body_text(), "日本人");

        let failed = WireResponse {
            status: 500,
            body: Vec::new(),
        };
        assert!(!failed.is_success());
    }
}
