//! Request builders, one per engine operation.
//!
//! Each builder only accumulates parameters and an optional body.
//! [`SolrRequest`] closes over them and decides the endpoint, HTTP method
//! and fixed bodies when the request is turned into a [`WireRequest`].

mod delete;
mod dih;
mod params;
mod ping;
mod query;
mod update;
pub mod xml;

pub use delete::DeleteRequest;
pub use dih::{DihCommandRequest, DEFAULT_HANDLER_PATH};
pub use params::RequestParams;
pub use ping::PingRequest;
pub use query::{QueryRequest, Sort, SortOrder};
pub use update::{AddRequest, RequestBody, UpdateRequest, CONTENT_TYPE_JSON, CONTENT_TYPE_XML};

use solr_client_shared::WireFormat;
use std::fmt;

use crate::errors::SolrError;
use crate::interfaces::{HttpMethod, WireRequest};

pub const SELECT_PATH: &str = "/select";
pub const UPDATE_PATH: &str = "/update";
pub const PING_PATH: &str = "/admin/ping";

/// The operation a request performs, which also selects the response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Update,
    Delete,
    Commit,
    Optimize,
    Rollback,
    Ping,
    DihCommand,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Commit => "commit",
            Self::Optimize => "optimize",
            Self::Rollback => "rollback",
            Self::Ping => "ping",
            Self::DihCommand => "dih_command",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any request the client can send.
#[derive(Debug, Clone, PartialEq)]
pub enum SolrRequest {
    Query(QueryRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
    Commit(UpdateRequest),
    Optimize(UpdateRequest),
    Rollback(UpdateRequest),
    Ping(PingRequest),
    DihCommand(DihCommandRequest),
}

impl SolrRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Query(_) => OperationKind::Query,
            Self::Update(_) => OperationKind::Update,
            Self::Delete(_) => OperationKind::Delete,
            Self::Commit(_) => OperationKind::Commit,
            Self::Optimize(_) => OperationKind::Optimize,
            Self::Rollback(_) => OperationKind::Rollback,
            Self::Ping(_) => OperationKind::Ping,
            Self::DihCommand(_) => OperationKind::DihCommand,
        }
    }

    /// Handler path relative to the core.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Query(_) => SELECT_PATH,
            Self::Update(_)
            | Self::Delete(_)
            | Self::Commit(_)
            | Self::Optimize(_)
            | Self::Rollback(_) => UPDATE_PATH,
            Self::Ping(_) => PING_PATH,
            Self::DihCommand(request) => request.handler_path(),
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Query(_) | Self::Ping(_) | Self::DihCommand(_) => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    pub fn params(&self) -> &RequestParams {
        match self {
            Self::Query(request) => request.params(),
            Self::Update(request)
            | Self::Commit(request)
            | Self::Optimize(request)
            | Self::Rollback(request) => request.params(),
            Self::Delete(request) => request.params(),
            Self::Ping(request) => request.params(),
            Self::DihCommand(request) => request.params(),
        }
    }

    /// The format requested by the builder, if it overrides the default.
    pub fn format(&self) -> Option<WireFormat> {
        match self {
            Self::Query(request) => request.format(),
            Self::Update(request)
            | Self::Commit(request)
            | Self::Optimize(request)
            | Self::Rollback(request) => request.format(),
            Self::Delete(request) => request.format(),
            Self::Ping(request) => request.format(),
            Self::DihCommand(request) => request.format(),
        }
    }

    /// The body to send. Commit, optimize and rollback always send their
    /// fixed message, ignoring any body set on the underlying update.
    pub fn body(&self) -> Result<Option<RequestBody>, SolrError> {
        Ok(match self {
            Self::Update(request) => request.body().cloned(),
            Self::Delete(request) => Some(RequestBody::xml(request.to_xml()?)),
            Self::Commit(_) => Some(RequestBody::xml(xml::COMMIT)),
            Self::Optimize(_) => Some(RequestBody::xml(xml::OPTIMIZE)),
            Self::Rollback(_) => Some(RequestBody::xml(xml::ROLLBACK)),
            Self::Query(_) | Self::Ping(_) | Self::DihCommand(_) => None,
        })
    }

    /// Build the transport-level exchange.
    ///
    /// `core` prefixes the handler path; `default_format` applies when the
    /// builder did not choose one. The `wt` parameter always reflects the
    /// format the response will be decoded with.
    pub fn to_wire(
        &self,
        core: Option<&str>,
        default_format: WireFormat,
    ) -> Result<WireRequest, SolrError> {
        let format = self.format().unwrap_or(default_format);
        let mut params = self.params().clone();
        params.set("wt", format.as_param());

        let path = match core.map(|c| c.trim_matches('/')).filter(|c| !c.is_empty()) {
            Some(core) => format!("/{}{}", core, self.endpoint()),
            None => self.endpoint().to_string(),
        };

        Ok(WireRequest {
            kind: self.kind(),
            method: self.method(),
            path,
            params,
            body: self.body()?,
            format,
        })
    }
}

impl From<QueryRequest> for SolrRequest {
    fn from(request: QueryRequest) -> Self {
        Self::Query(request)
    }
}

impl From<DeleteRequest> for SolrRequest {
    fn from(request: DeleteRequest) -> Self {
        Self::Delete(request)
    }
}

impl From<PingRequest> for SolrRequest {
    fn from(request: PingRequest) -> Self {
        Self::Ping(request)
    }
}

impl From<DihCommandRequest> for SolrRequest {
    fn from(request: DihCommandRequest) -> Self {
        Self::DihCommand(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_and_methods() {
        let cases = vec![
            (SolrRequest::Query(QueryRequest::new("*:*")), "/select", HttpMethod::Get),
            (SolrRequest::Update(UpdateRequest::new()), "/update", HttpMethod::Post),
            (
                SolrRequest::Delete(DeleteRequest::by_unique_keys(["1"])),
                "/update",
                HttpMethod::Post,
            ),
            (SolrRequest::Commit(UpdateRequest::new()), "/update", HttpMethod::Post),
            (SolrRequest::Ping(PingRequest::new()), "/admin/ping", HttpMethod::Get),
            (
                SolrRequest::DihCommand(DihCommandRequest::new("status")),
                "/dataimport",
                HttpMethod::Get,
            ),
        ];

        for (request, endpoint, method) in cases {
            assert_eq!(request.endpoint(), endpoint);
            assert_eq!(request.method(), method);
        }
    }

    #[test]
    fn test_fixed_bodies() {
        let commit = SolrRequest::Commit(UpdateRequest::xml("<ignored/>"));
        assert_eq!(commit.body().unwrap().unwrap().content, "<commit/>");

        let optimize = SolrRequest::Optimize(UpdateRequest::new());
        assert_eq!(optimize.body().unwrap().unwrap().content, "<optimize/>");

        let rollback = SolrRequest::Rollback(UpdateRequest::new());
        assert_eq!(rollback.body().unwrap().unwrap().content, "<rollback/>");

        let bare = SolrRequest::Update(UpdateRequest::new());
        assert!(bare.body().unwrap().is_none());
    }

    #[test]
    fn test_to_wire_prefixes_core_and_sets_wt() {
        let request = SolrRequest::Query(QueryRequest::new("author:Rick").with_param("wt", "csv"));
        let wire = request.to_wire(Some("books"), WireFormat::Json).unwrap();

        assert_eq!(wire.path, "/books/select");
        assert_eq!(wire.format, WireFormat::Json);
        assert_eq!(wire.params.get("wt"), Some("json"));
        assert_eq!(wire.params.get("q"), Some("author:Rick"));
        assert_eq!(wire.kind, OperationKind::Query);
    }

    #[test]
    fn test_builder_format_overrides_default() {
        let request = SolrRequest::Ping(PingRequest::new().with_format(WireFormat::Json));
        let wire = request.to_wire(None, WireFormat::Xml).unwrap();

        assert_eq!(wire.path, "/admin/ping");
        assert_eq!(wire.format, WireFormat::Json);
    }

    #[test]
    fn test_to_wire_does_not_mutate_request() {
        let request = SolrRequest::Commit(UpdateRequest::new());
        let first = request.to_wire(None, WireFormat::Xml).unwrap();
        let second = request.to_wire(None, WireFormat::Xml).unwrap();

        assert_eq!(first, second);
        assert!(request.params().get("wt").is_none());
    }

    #[test]
    fn test_empty_delete_fails_before_sending() {
        let request = SolrRequest::Delete(DeleteRequest::new());
        assert!(matches!(
            request.to_wire(None, WireFormat::Xml),
            Err(SolrError::InvalidRequest(_))
        ));
    }
}
