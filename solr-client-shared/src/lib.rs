//! # Solr Client Shared
//!
//! Data model shared by the Solr client crates: schema-less field values,
//! documents, and the typed responses produced by the response parser.

pub mod dih;
pub mod document;
pub mod field_value;
pub mod response;
pub mod wire_format;

pub use dih::{DihCommandResponse, DihInitArgs, DihStatus, DihStatusMessages};
pub use document::Document;
pub use field_value::FieldValue;
pub use response::{
    DeleteResponse, FacetCount, Facets, Highlighting, Highlightings, MoreLikeThis, PingResponse,
    QueryResponse, ResponseHeader, ResultPage, SolrResponse, UpdateResponse,
};
pub use wire_format::WireFormat;
