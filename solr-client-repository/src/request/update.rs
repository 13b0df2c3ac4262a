//! Update request builders.

use serde::Serialize;
use solr_client_shared::{Document, WireFormat};

use crate::errors::SolrError;
use crate::request::params::RequestParams;
use crate::request::xml;

pub const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// A raw request body and its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content: String,
    pub content_type: &'static str,
}

impl RequestBody {
    pub fn xml(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: CONTENT_TYPE_XML,
        }
    }

    pub fn json(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: CONTENT_TYPE_JSON,
        }
    }

    pub fn is_json(&self) -> bool {
        self.content_type == CONTENT_TYPE_JSON
    }
}

/// Request against the `/update` handler.
///
/// Carries an optional raw body (add/delete/commit/optimize messages).
/// Without a body it is used for the bare commit, optimize and rollback
/// calls, which supply their own fixed message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    params: RequestParams,
    body: Option<RequestBody>,
    format: Option<WireFormat>,
}

impl UpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an update carrying an XML message, e.g. `<optimize/>`.
    pub fn xml(body: impl Into<String>) -> Self {
        Self {
            body: Some(RequestBody::xml(body)),
            ..Self::default()
        }
    }

    /// Create an update carrying a JSON message serialized from `value`.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, SolrError> {
        let content = serde_json::to_string(value)
            .map_err(|e| SolrError::invalid_request(format!("Invalid JSON body: {}", e)))?;
        Ok(Self {
            body: Some(RequestBody::json(content)),
            ..Self::default()
        })
    }

    /// Replace the body with a raw XML message.
    pub fn set_request_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(RequestBody::xml(body));
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.set(name, value);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    /// Ask the engine to commit after applying this update.
    pub fn with_commit(self) -> Self {
        self.with_param("commit", "true")
    }

    pub fn with_format(mut self, format: WireFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub fn format(&self) -> Option<WireFormat> {
        self.format
    }
}

/// Documents to add or replace, sent as an XML `<add>` message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddRequest {
    documents: Vec<Document>,
    params: RequestParams,
    format: Option<WireFormat>,
}

impl AddRequest {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    pub fn push(&mut self, document: Document) -> &mut Self {
        self.documents.push(document);
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

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The equivalent raw update request.
    pub fn to_update_request(&self) -> Result<UpdateRequest, SolrError> {
        if self.documents.is_empty() {
            return Err(SolrError::invalid_request("No documents to add"));
        }
        Ok(UpdateRequest {
            params: self.params.clone(),
            body: Some(RequestBody::xml(xml::add_documents(&self.documents))),
            format: self.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_update_has_no_body() {
        let request = UpdateRequest::new();
        assert!(request.body().is_none());
        assert!(request.params().is_empty());
    }

    #[test]
    fn test_set_request_body() {
        let mut request = UpdateRequest::new();
        request.set_request_body("<optimize/>");

        let body = request.body().unwrap();
        assert_eq!(body.content, "<optimize/>");
        assert_eq!(body.content_type, CONTENT_TYPE_XML);
    }

    #[test]
    fn test_json_body() {
        let request = UpdateRequest::json(&json!([{ "id": "1", "title": "日本語" }]))
            .unwrap()
            .with_commit();

        let body = request.body().unwrap();
        assert!(body.is_json());
        assert_eq!(body.content, r#"[{"id":"1","title":"日本語"}]"#);
        assert_eq!(request.params().get("commit"), Some("true"));
    }

    #[test]
    fn test_add_request_builds_xml() {
        let request = AddRequest::new(vec![Document::new().with_field("id", "42")]);
        let update = request.to_update_request().unwrap();

        assert_eq!(
            update.body().unwrap().content,
            "<add><doc><field name=\"id\">42</field></doc></add>"
        );
    }

    #[test]
    fn test_empty_add_request_is_invalid() {
        let result = AddRequest::default().to_update_request();
        assert!(matches!(result, Err(SolrError::InvalidRequest(_))));
    }
}
