//! HTTP implementation of the transport collaborator.
//!
//! This module provides a concrete implementation of `SolrTransport`
//! using reqwest.

mod transport;

pub use transport::HttpTransport;
