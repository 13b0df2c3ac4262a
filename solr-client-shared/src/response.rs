//! Typed responses returned by the Solr client.
//!
//! Optional sections (facets, highlighting, more-like-this) are plain
//! containers that are empty when the engine omitted them.

use serde::Serialize;

use crate::dih::DihCommandResponse;
use crate::document::Document;

/// The `responseHeader` block present on every Solr reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseHeader {
    /// Engine status code, `0` on success.
    pub status: i32,
    /// Server-side elapsed time (`QTime`) in milliseconds.
    pub query_time_ms: u64,
    /// Request parameters echoed by the engine, in wire order.
    pub params: Vec<(String, String)>,
}

impl ResponseHeader {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// First echoed value for a parameter name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// One page of matching documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultPage {
    /// Total number of matches across all pages.
    pub num_found: u64,
    /// Offset of the first document in this page.
    pub start: u64,
    pub documents: Vec<Document>,
}

impl ResultPage {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// A single facet bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

/// The `facet_counts` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    /// `facet.query` expressions and their hit counts.
    pub facet_queries: Vec<(String, u64)>,
    /// Per facet field, buckets in the order the engine ranked them.
    pub facet_fields: Vec<(String, Vec<FacetCount>)>,
}

impl Facets {
    /// Buckets for a facet field; empty if the field was not faceted.
    pub fn field(&self, name: &str) -> &[FacetCount] {
        self.facet_fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, counts)| counts.as_slice())
            .unwrap_or(&[])
    }

    pub fn query_count(&self, query: &str) -> Option<u64> {
        self.facet_queries
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, count)| *count)
    }

    pub fn is_empty(&self) -> bool {
        self.facet_queries.is_empty() && self.facet_fields.is_empty()
    }
}

/// Highlighted snippets for one document, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlighting {
    /// The document's unique key.
    pub key: String,
    pub fields: Vec<(String, Vec<String>)>,
}

/// The `highlighting` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlightings {
    pub documents: Vec<Highlighting>,
}

impl Highlightings {
    pub fn get(&self, key: &str) -> Option<&Highlighting> {
        self.documents.iter().find(|doc| doc.key == key)
    }

    /// Snippets for a document field; empty if none were produced.
    pub fn snippets(&self, key: &str, field: &str) -> &[String] {
        self.get(key)
            .and_then(|doc| doc.fields.iter().find(|(name, _)| name == field))
            .map(|(_, snippets)| snippets.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// The `moreLikeThis` section: similar documents per result key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoreLikeThis {
    pub clusters: Vec<(String, ResultPage)>,
}

impl MoreLikeThis {
    pub fn get(&self, key: &str) -> Option<&ResultPage> {
        self.clusters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, page)| page)
    }

    /// Documents similar to `key`; empty if the engine returned none.
    pub fn similar_to(&self, key: &str) -> &[Document] {
        self.get(key)
            .map(|page| page.documents.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Response to a query request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResponse {
    pub header: ResponseHeader,
    pub response: ResultPage,
    pub facets: Facets,
    pub highlightings: Highlightings,
    pub more_like_this: MoreLikeThis,
}

impl QueryResponse {
    pub fn documents(&self) -> &[Document] {
        &self.response.documents
    }
}

/// Response to update, delete, commit, optimize and rollback requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateResponse {
    pub header: ResponseHeader,
}

pub type DeleteResponse = UpdateResponse;

/// Response to a ping request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PingResponse {
    pub header: ResponseHeader,
    /// Liveness reported by the engine, `OK` when healthy.
    pub status: String,
}

impl PingResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Any typed response, one variant per response shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolrResponse {
    Query(QueryResponse),
    Update(UpdateResponse),
    Ping(PingResponse),
    DihCommand(DihCommandResponse),
}

impl SolrResponse {
    pub fn header(&self) -> &ResponseHeader {
        match self {
            Self::Query(response) => &response.header,
            Self::Update(response) => &response.header,
            Self::Ping(response) => &response.header,
            Self::DihCommand(response) => &response.header,
        }
    }
}
