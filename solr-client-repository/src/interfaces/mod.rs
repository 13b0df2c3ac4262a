//! Interface definitions for the transport collaborator.
//!
//! This module defines the abstract `SolrTransport` trait that allows
//! for dependency injection and swappable HTTP implementations.

mod solr_transport;

pub use solr_transport::{HttpMethod, SolrTransport, WireRequest, WireResponse};
