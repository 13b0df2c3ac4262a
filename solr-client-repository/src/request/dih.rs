//! Data Import Handler command builder.

use solr_client_shared::WireFormat;

use crate::request::params::RequestParams;

/// Default mount point of the import handler.
pub const DEFAULT_HANDLER_PATH: &str = "/dataimport";

/// A DIH command such as `full-import`, `delta-import`, `status` or `abort`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DihCommandRequest {
    handler_path: String,
    params: RequestParams,
    format: Option<WireFormat>,
}

impl DihCommandRequest {
    pub fn new(command: impl Into<String>) -> Self {
        let mut params = RequestParams::new();
        params.set("command", command);
        Self {
            handler_path: DEFAULT_HANDLER_PATH.to_string(),
            params,
            format: None,
        }
    }

    pub fn command(&self) -> &str {
        self.params.get("command").unwrap_or_default()
    }

    /// Set an extra parameter such as `clean`, `commit` or `entity`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.set(name, value);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    /// Use a handler mounted somewhere other than `/dataimport`.
    pub fn with_handler_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.handler_path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    pub fn with_format(mut self, format: WireFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn handler_path(&self) -> &str {
        &self.handler_path
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub fn format(&self) -> Option<WireFormat> {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_param() {
        let request = DihCommandRequest::new("delta-import").with_param("clean", "false");

        assert_eq!(request.command(), "delta-import");
        assert_eq!(request.params().get("command"), Some("delta-import"));
        assert_eq!(request.params().get("clean"), Some("false"));
        assert_eq!(request.handler_path(), "/dataimport");
    }

    #[test]
    fn test_command_follows_param_override() {
        let mut request = DihCommandRequest::new("delta-import");
        request.set("command", "full-import");

        assert_eq!(request.command(), "full-import");
        assert_eq!(request.params().get_all("command").count(), 1);
    }

    #[test]
    fn test_custom_handler_path() {
        let request = DihCommandRequest::new("status").with_handler_path("dih-products");
        assert_eq!(request.handler_path(), "/dih-products");
    }
}
