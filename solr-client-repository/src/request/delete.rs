//! Delete request builder.

use solr_client_shared::WireFormat;

use crate::errors::SolrError;
use crate::request::params::RequestParams;
use crate::request::xml;

/// Delete documents by unique key and/or by query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteRequest {
    unique_keys: Vec<String>,
    queries: Vec<String>,
    params: RequestParams,
    format: Option<WireFormat>,
}

impl DeleteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete the documents with the given unique keys.
    pub fn by_unique_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut request = Self::new();
        request.set_unique_keys(keys);
        request
    }

    /// Replace the unique keys to delete.
    pub fn set_unique_keys<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_unique_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.unique_keys.push(key.into());
        self
    }

    /// Also delete every document matching `query`.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.queries.push(query.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.set(name, value);
        self
    }

    pub fn with_format(mut self, format: WireFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn unique_keys(&self) -> &[String] {
        &self.unique_keys
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub fn format(&self) -> Option<WireFormat> {
        self.format
    }

    /// The `<delete>` message for this request.
    pub fn to_xml(&self) -> Result<String, SolrError> {
        if self.unique_keys.is_empty() && self.queries.is_empty() {
            return Err(SolrError::invalid_request(
                "Delete request needs at least one unique key or query",
            ));
        }
        Ok(xml::delete(&self.unique_keys, &self.queries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_by_unique_key() {
        let request = DeleteRequest::by_unique_keys(["978-0641723445"]);

        assert_eq!(request.unique_keys(), ["978-0641723445".to_string()]);
        assert_eq!(
            request.to_xml().unwrap(),
            "<delete><id>978-0641723445</id></delete>"
        );
    }

    #[test]
    fn test_delete_by_query() {
        let request = DeleteRequest::new().with_query("cat:obsolete");
        assert_eq!(
            request.to_xml().unwrap(),
            "<delete><query>cat:obsolete</query></delete>"
        );
    }

    #[test]
    fn test_empty_delete_is_invalid() {
        assert!(matches!(
            DeleteRequest::new().to_xml(),
            Err(SolrError::InvalidRequest(_))
        ));
    }
}
