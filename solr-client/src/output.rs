//! Rendering of typed responses for the terminal.

use crate::commands::OutputMode;
use crate::CliError;
use solr_client_shared::{
    DihCommandResponse, DihStatus, Document, PingResponse, QueryResponse, ResponseHeader,
    SolrResponse,
};

pub fn render(response: &SolrResponse, mode: OutputMode) -> Result<String, CliError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputMode::Summary => Ok(summary(response)),
    }
}

fn summary(response: &SolrResponse) -> String {
    match response {
        SolrResponse::Query(query) => query_summary(query),
        SolrResponse::Update(update) => header_line(&update.header),
        SolrResponse::Ping(ping) => ping_summary(ping),
        SolrResponse::DihCommand(dih) => dih_summary(dih),
    }
}

fn header_line(header: &ResponseHeader) -> String {
    format!("status={} qtime={}ms", header.status, header.query_time_ms)
}

fn document_line(document: &Document) -> String {
    document
        .iter()
        .map(|(name, value)| format!("{}={}", name, value.as_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn query_summary(response: &QueryResponse) -> String {
    let mut out = format!(
        "{} numFound={} start={}\n",
        header_line(&response.header),
        response.response.num_found,
        response.response.start
    );

    for document in response.documents() {
        out.push_str(&format!("  {}\n", document_line(document)));
    }

    for (query, count) in &response.facets.facet_queries {
        out.push_str(&format!("facet query {}: {}\n", query, count));
    }
    for (field, counts) in &response.facets.facet_fields {
        let buckets: Vec<String> = counts
            .iter()
            .map(|bucket| format!("{} ({})", bucket.value, bucket.count))
            .collect();
        out.push_str(&format!("facet {}: {}\n", field, buckets.join(", ")));
    }

    for highlighting in &response.highlightings.documents {
        for (field, snippets) in &highlighting.fields {
            out.push_str(&format!(
                "highlight {} {}: {}\n",
                highlighting.key,
                field,
                snippets.join(" | ")
            ));
        }
    }

    for (key, page) in &response.more_like_this.clusters {
        out.push_str(&format!("more like {}: {} found\n", key, page.num_found));
        for document in &page.documents {
            out.push_str(&format!("  {}\n", document_line(document)));
        }
    }

    out.trim_end().to_string()
}

fn ping_summary(response: &PingResponse) -> String {
    format!(
        "{} ping={}",
        header_line(&response.header),
        if response.status.is_empty() {
            "unknown"
        } else {
            response.status.as_str()
        }
    )
}

fn dih_status(status: &DihStatus) -> &str {
    match status {
        DihStatus::Idle => "idle",
        DihStatus::Busy => "busy",
        DihStatus::Unknown(raw) => raw.as_str(),
        DihStatus::Missing => "unknown",
    }
}

fn dih_summary(response: &DihCommandResponse) -> String {
    let mut out = format!(
        "{} command={} job={}\n",
        header_line(&response.header),
        response.command,
        dih_status(&response.status)
    );
    if !response.import_response.is_empty() {
        out.push_str(&format!("{}\n", response.import_response));
    }
    for (name, value) in &response.status_messages.entries {
        if name.is_empty() {
            out.push_str(&format!("  {}\n", value));
        } else {
            out.push_str(&format!("  {}: {}\n", name, value));
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use solr_client_shared::{FacetCount, FieldValue, Facets, ResultPage, UpdateResponse};

    fn header() -> ResponseHeader {
        ResponseHeader {
            status: 0,
            query_time_ms: 3,
            params: Vec::new(),
        }
    }

    #[test]
    fn test_query_summary() {
        let response = QueryResponse {
            header: header(),
            response: ResultPage {
                num_found: 1,
                start: 0,
                documents: vec![Document::new()
                    .with_field("id", "978-0641723445")
                    .with_field("cat", FieldValue::multi(["book", "hardcover"]))],
            },
            facets: Facets {
                facet_queries: Vec::new(),
                facet_fields: vec![(
                    "cat".to_string(),
                    vec![FacetCount {
                        value: "book".to_string(),
                        count: 1,
                    }],
                )],
            },
            ..Default::default()
        };

        let text = render(&SolrResponse::Query(response), OutputMode::Summary).unwrap();

        assert_eq!(
            text,
            "status=0 qtime=3ms numFound=1 start=0\n  id=978-0641723445 cat=book, hardcover\nfacet cat: book (1)"
        );
    }

    #[test]
    fn test_dih_summary() {
        let mut response = DihCommandResponse {
            header: header(),
            command: "delta-import".to_string(),
            status: DihStatus::Busy,
            import_response: "A command is still running...".to_string(),
            ..Default::default()
        };
        response
            .status_messages
            .entries
            .push(("Total Rows Fetched".to_string(), "12".to_string()));

        let text = render(&SolrResponse::DihCommand(response), OutputMode::Summary).unwrap();

        assert_eq!(
            text,
            "status=0 qtime=3ms command=delta-import job=busy\nA command is still running...\n  Total Rows Fetched: 12"
        );
    }

    #[test]
    fn test_json_output_is_tagged() {
        let response = SolrResponse::Update(UpdateResponse { header: header() });
        let text = render(&response, OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["kind"], "update");
        assert_eq!(value["header"]["query_time_ms"], 3);
    }
}
