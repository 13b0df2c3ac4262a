//! Error types for the Solr client repository.

mod solr_error;

pub use solr_error::SolrError;
