//! Query request builder.

use solr_client_shared::WireFormat;

use crate::request::params::RequestParams;

/// Direction of a sort clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A `sort` expression made of one or more `field order` clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    clauses: Vec<(String, SortOrder)>,
}

impl Sort {
    pub fn by(field: impl Into<String>, order: SortOrder) -> Self {
        Self::default().then_by(field, order)
    }

    /// Add a tie-breaking clause.
    pub fn then_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.clauses.push((field.into(), order));
        self
    }

    pub fn to_param(&self) -> String {
        self.clauses
            .iter()
            .map(|(field, order)| format!("{} {}", field, order.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Request against the `/select` handler.
///
/// The builder only writes standard Solr parameters; anything else can be
/// passed through with [`QueryRequest::set`] or [`QueryRequest::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    params: RequestParams,
    format: Option<WireFormat>,
}

impl QueryRequest {
    /// Create a query for the given `q` expression, e.g. `author:Rick`.
    pub fn new(query: impl Into<String>) -> Self {
        let mut params = RequestParams::new();
        params.set("q", query);
        Self {
            params,
            format: None,
        }
    }

    /// The `q` expression.
    pub fn query(&self) -> &str {
        self.params.get("q").unwrap_or_default()
    }

    /// Set a raw parameter, replacing existing values.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.set(name, value);
        self
    }

    /// Append a raw parameter value.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.add(name, value);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(name, value);
        self
    }

    pub fn with_sort(mut self, sort: &Sort) -> Self {
        self.params.set("sort", sort.to_param());
        self
    }

    /// Restrict the returned fields (`fl`).
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.params.set("fl", fields.join(","));
        self
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.params.set("start", start.to_string());
        self
    }

    pub fn with_rows(mut self, rows: u64) -> Self {
        self.params.set("rows", rows.to_string());
        self
    }

    /// Add a filter query (`fq`). May be called repeatedly.
    pub fn with_filter_query(mut self, filter: impl Into<String>) -> Self {
        self.params.add("fq", filter);
        self
    }

    /// Enable more-like-this on the given fields.
    pub fn with_more_like_this(mut self, fields: &[&str], count: Option<u32>) -> Self {
        self.params.set("mlt", "true");
        self.params.set("mlt.fl", fields.join(","));
        if let Some(count) = count {
            self.params.set("mlt.count", count.to_string());
        }
        self
    }

    /// Enable faceting on the given fields.
    pub fn with_facet_fields(mut self, fields: &[&str]) -> Self {
        self.params.set("facet", "true");
        for field in fields {
            self.params.add("facet.field", *field);
        }
        self
    }

    /// Add a `facet.query` expression.
    pub fn with_facet_query(mut self, query: impl Into<String>) -> Self {
        self.params.set("facet", "true");
        self.params.add("facet.query", query);
        self
    }

    pub fn with_facet_limit(mut self, limit: i64) -> Self {
        self.params.set("facet.limit", limit.to_string());
        self
    }

    pub fn with_facet_min_count(mut self, min_count: u64) -> Self {
        self.params.set("facet.mincount", min_count.to_string());
        self
    }

    /// Enable highlighting on the given fields.
    pub fn with_highlighting(mut self, fields: &[&str]) -> Self {
        self.params.set("hl", "true");
        self.params.set("hl.fl", fields.join(","));
        self
    }

    /// Override the client's default response format.
    pub fn with_format(mut self, format: WireFormat) -> Self {
        self.format = Some(format);
        self
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
    fn test_query_builder() {
        let request = QueryRequest::new("author:Rick")
            .with_sort(&Sort::by("price", SortOrder::Descending).then_by("id", SortOrder::Ascending))
            .with_fields(&["id", "title"])
            .with_start(10)
            .with_rows(5)
            .with_filter_query("inStock:true")
            .with_filter_query("cat:book");

        let params = request.params();
        assert_eq!(request.query(), "author:Rick");
        assert_eq!(params.get("sort"), Some("price desc,id asc"));
        assert_eq!(params.get("fl"), Some("id,title"));
        assert_eq!(params.get("start"), Some("10"));
        assert_eq!(params.get("rows"), Some("5"));
        assert_eq!(params.get_all("fq").count(), 2);
    }

    #[test]
    fn test_more_like_this_via_raw_params() {
        let mut request = QueryRequest::new("author:日本人");
        request.set("mlt", "true").set("mlt.fl", "author");

        assert_eq!(request.params().get("mlt"), Some("true"));
        assert_eq!(request.params().get("mlt.fl"), Some("author"));
        assert_eq!(request.query(), "author:日本人");
    }

    #[test]
    fn test_more_like_this_builder() {
        let request = QueryRequest::new("id:1").with_more_like_this(&["author", "cat"], Some(3));

        assert_eq!(request.params().get("mlt"), Some("true"));
        assert_eq!(request.params().get("mlt.fl"), Some("author,cat"));
        assert_eq!(request.params().get("mlt.count"), Some("3"));
    }

    #[test]
    fn test_facet_and_highlight_builder() {
        let request = QueryRequest::new("*:*")
            .with_facet_fields(&["cat", "author"])
            .with_facet_query("price:[0 TO 10]")
            .with_facet_min_count(1)
            .with_highlighting(&["title"]);

        let params = request.params();
        assert_eq!(params.get("facet"), Some("true"));
        assert_eq!(
            params.get_all("facet.field").collect::<Vec<_>>(),
            vec!["cat", "author"]
        );
        assert_eq!(params.get("facet.query"), Some("price:[0 TO 10]"));
        assert_eq!(params.get("facet.mincount"), Some("1"));
        assert_eq!(params.get("hl"), Some("true"));
        assert_eq!(params.get("hl.fl"), Some("title"));
    }
}
