//! # Solr Client Repository
//!
//! This crate provides the protocol layer for talking to a Solr server:
//! request builders, the response parser, the transport trait with a
//! reqwest implementation, and the `SolrClient` that ties them together.

pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod interfaces;
pub mod request;
pub mod response;

pub use client::SolrClient;
pub use config::SolrClientConfig;
pub use errors::SolrError;
pub use http::HttpTransport;
pub use interfaces::{HttpMethod, SolrTransport, WireRequest, WireResponse};
pub use request::{
    AddRequest, DeleteRequest, DihCommandRequest, OperationKind, PingRequest, QueryRequest,
    RequestParams, Sort, SortOrder, SolrRequest, UpdateRequest,
};
pub use response::ResponseParser;
