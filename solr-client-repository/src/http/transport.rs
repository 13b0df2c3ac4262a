//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use crate::errors::SolrError;
use crate::interfaces::{HttpMethod, SolrTransport, WireRequest, WireResponse};

/// HTTP transport talking to a single Solr server.
///
/// # Example
///
/// ```ignore
/// let transport = HttpTransport::new("http://localhost:8983/solr", Duration::from_secs(30))?;
/// let client = SolrClient::with_config(Arc::new(transport), SolrClientConfig::for_core("books"));
/// let response = client.do_ping(&PingRequest::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for the given server URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The Solr base URL (e.g., "http://localhost:8983/solr")
    /// * `timeout` - Timeout for a whole exchange
    ///
    /// # Returns
    ///
    /// * `Ok(HttpTransport)` - A new transport
    /// * `Err(SolrError)` - If the URL is invalid or the HTTP client cannot be built
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SolrError> {
        let base_url = Url::parse(url)
            .map_err(|e| SolrError::invalid_request(format!("Invalid Solr URL {}: {}", url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SolrError::transport(e.to_string()))?;

        info!(url = %base_url, timeout_ms = timeout.as_millis() as u64, "Created Solr HTTP transport");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for an exchange: base URL path, handler path, query string.
    fn request_url(&self, request: &WireRequest) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            request.path_and_query()
        )
    }
}

#[async_trait]
impl SolrTransport for HttpTransport {
    #[instrument(skip(self, request), fields(kind = %request.kind, method = %request.method, path = %request.path))]
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, SolrError> {
        let url = self.request_url(request);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type)
                .body(body.content.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "Received Solr response");

        Ok(WireResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{OperationKind, RequestParams};
    use solr_client_shared::WireFormat;

    #[test]
    fn test_invalid_url() {
        let result = HttpTransport::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(SolrError::InvalidRequest(_))));
    }

    #[test]
    fn test_request_url_joins_base_and_path() {
        let transport = HttpTransport::new("http://localhost:8983/solr/", Duration::from_secs(1)).unwrap();
        let mut params = RequestParams::new();
        params.set("q", "*:*").set("wt", "xml");
        let request = WireRequest {
            kind: OperationKind::Query,
            method: HttpMethod::Get,
            path: "/books/select".to_string(),
            params,
            body: None,
            format: WireFormat::Xml,
        };

        assert_eq!(
            transport.request_url(&request),
            "http://localhost:8983/solr/books/select?q=%2A%3A%2A&wt=xml"
        );
    }
}
