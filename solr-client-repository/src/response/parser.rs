//! Response parser.
//!
//! Turns a raw payload into the typed response for the operation that
//! produced it. Only the payload itself and the `responseHeader` are
//! mandatory; every other section is decoded leniently.

use solr_client_shared::{
    DihCommandResponse, DihInitArgs, DihStatus, DihStatusMessages, Document, FacetCount, Facets,
    FieldValue, Highlighting, Highlightings, MoreLikeThis, PingResponse, QueryResponse,
    ResponseHeader, ResultPage, SolrResponse, UpdateResponse, WireFormat,
};
use tracing::debug;

use crate::errors::SolrError;
use crate::request::OperationKind;
use crate::response::node::Node;

/// Stateless decoder from wire payloads to typed responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    /// Decode a payload for any operation.
    pub fn parse(
        kind: OperationKind,
        format: WireFormat,
        payload: &[u8],
    ) -> Result<SolrResponse, SolrError> {
        Ok(match kind {
            OperationKind::Query => SolrResponse::Query(Self::parse_query(format, payload)?),
            OperationKind::Update
            | OperationKind::Delete
            | OperationKind::Commit
            | OperationKind::Optimize
            | OperationKind::Rollback => SolrResponse::Update(Self::parse_update(format, payload)?),
            OperationKind::Ping => SolrResponse::Ping(Self::parse_ping(format, payload)?),
            OperationKind::DihCommand => {
                SolrResponse::DihCommand(Self::parse_dih_command(format, payload)?)
            }
        })
    }

    pub fn parse_query(format: WireFormat, payload: &[u8]) -> Result<QueryResponse, SolrError> {
        let root = decode(format, payload)?;
        let header = parse_header(&root)?;

        let response = root.get("response").map(parse_result_page).unwrap_or_default();
        let facets = root.get("facet_counts").map(parse_facets).unwrap_or_default();
        let highlightings = root
            .get("highlighting")
            .map(parse_highlightings)
            .unwrap_or_default();
        let more_like_this = root
            .get("moreLikeThis")
            .map(parse_more_like_this)
            .unwrap_or_default();

        debug!(
            num_found = response.num_found,
            returned = response.documents.len(),
            facet_fields = facets.facet_fields.len(),
            "Decoded query response"
        );

        Ok(QueryResponse {
            header,
            response,
            facets,
            highlightings,
            more_like_this,
        })
    }

    pub fn parse_update(format: WireFormat, payload: &[u8]) -> Result<UpdateResponse, SolrError> {
        let root = decode(format, payload)?;
        Ok(UpdateResponse {
            header: parse_header(&root)?,
        })
    }

    pub fn parse_ping(format: WireFormat, payload: &[u8]) -> Result<PingResponse, SolrError> {
        let root = decode(format, payload)?;
        Ok(PingResponse {
            header: parse_header(&root)?,
            status: text(&root, "status"),
        })
    }

    pub fn parse_dih_command(
        format: WireFormat,
        payload: &[u8],
    ) -> Result<DihCommandResponse, SolrError> {
        let raw_body = utf8(payload)?;
        let root = decode_str(format, raw_body)?;
        let header = parse_header(&root)?;

        let status_messages = DihStatusMessages {
            entries: root
                .get("statusMessages")
                .map(string_entries)
                .unwrap_or_default(),
        };
        let init_args = DihInitArgs {
            defaults: root
                .get("initArgs")
                .and_then(|args| named(args, "defaults"))
                .map(string_entries)
                .unwrap_or_default(),
        };

        Ok(DihCommandResponse {
            header,
            command: text(&root, "command"),
            status: DihStatus::parse(&text(&root, "status")),
            import_response: text(&root, "importResponse"),
            status_messages,
            init_args,
            raw_body: raw_body.to_string(),
        })
    }
}

fn utf8(payload: &[u8]) -> Result<&str, SolrError> {
    std::str::from_utf8(payload)
        .map_err(|e| SolrError::protocol_decode(format!("Payload is not valid UTF-8: {}", e)))
}

fn decode(format: WireFormat, payload: &[u8]) -> Result<Node, SolrError> {
    decode_str(format, utf8(payload)?)
}

fn decode_str(format: WireFormat, payload: &str) -> Result<Node, SolrError> {
    match format {
        WireFormat::Xml => Node::from_xml(payload),
        WireFormat::Json => Node::from_json(payload),
    }
}

fn parse_header(root: &Node) -> Result<ResponseHeader, SolrError> {
    let header = root
        .get("responseHeader")
        .ok_or_else(|| SolrError::protocol_decode("Missing responseHeader"))?;

    let status = header
        .get("status")
        .and_then(Node::as_text)
        .and_then(|s| s.trim().parse::<i32>().ok())
        .ok_or_else(|| SolrError::protocol_decode("Missing or invalid responseHeader.status"))?;
    let query_time_ms = header
        .get("QTime")
        .and_then(Node::as_text)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .ok_or_else(|| SolrError::protocol_decode("Missing or invalid responseHeader.QTime"))?;

    let mut params = Vec::new();
    for (name, value) in header.get("params").map(Node::entries).unwrap_or_default() {
        match value {
            Node::Scalar(v) => params.push((name.clone(), v.clone())),
            Node::List(items) => params.extend(
                items
                    .iter()
                    .filter_map(Node::as_text)
                    .map(|v| (name.clone(), v.to_string())),
            ),
            _ => {}
        }
    }

    Ok(ResponseHeader {
        status,
        query_time_ms,
        params,
    })
}

fn text(node: &Node, name: &str) -> String {
    node.get(name)
        .and_then(Node::as_text)
        .unwrap_or_default()
        .to_string()
}

fn count(node: &Node) -> Option<u64> {
    node.as_text().and_then(|s| s.trim().parse().ok())
}

/// Entries of a Solr named list: a map, or the flat `[name, value, ...]`
/// array sent with the default `json.nl=flat`.
fn named_list(node: &Node) -> Vec<(&str, &Node)> {
    match node {
        Node::Map(entries) => entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect(),
        Node::List(items) => items
            .chunks(2)
            .filter_map(|pair| match pair {
                [Node::Scalar(name), value] => Some((name.as_str(), value)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn named<'a>(node: &'a Node, name: &str) -> Option<&'a Node> {
    named_list(node)
        .into_iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn string_entries(node: &Node) -> Vec<(String, String)> {
    named_list(node)
        .into_iter()
        .filter_map(|(name, value)| value.as_text().map(|v| (name.to_string(), v.to_string())))
        .collect()
}

fn parse_result_page(node: &Node) -> ResultPage {
    ResultPage {
        num_found: node.get("numFound").and_then(count).unwrap_or(0),
        start: node.get("start").and_then(count).unwrap_or(0),
        documents: node
            .get("docs")
            .map(Node::items)
            .unwrap_or_default()
            .iter()
            .map(parse_document)
            .collect(),
    }
}

fn parse_document(node: &Node) -> Document {
    let mut document = Document::new();
    for (name, value) in node.entries() {
        match value {
            Node::Scalar(v) => document.push_value(name.as_str(), v.as_str()),
            Node::List(items) => {
                let values: Vec<String> = items
                    .iter()
                    .filter_map(Node::as_text)
                    .map(str::to_string)
                    .collect();
                if document.contains(name) {
                    for v in values {
                        document.push_value(name.as_str(), v);
                    }
                } else {
                    document.insert(name.as_str(), FieldValue::Multi(values));
                }
            }
            Node::Null => {}
            Node::Map(_) => debug!(field = %name, "Skipping nested document field"),
        }
    }
    document
}

fn parse_facets(node: &Node) -> Facets {
    let facet_queries = node
        .get("facet_queries")
        .map(Node::entries)
        .unwrap_or_default()
        .iter()
        .filter_map(|(query, value)| count(value).map(|c| (query.clone(), c)))
        .collect();

    let facet_fields = node
        .get("facet_fields")
        .map(Node::entries)
        .unwrap_or_default()
        .iter()
        .map(|(field, buckets)| (field.clone(), parse_facet_buckets(buckets)))
        .collect();

    Facets {
        facet_queries,
        facet_fields,
    }
}

/// Buckets come as a named list (XML, `json.nl=map`), a flat
/// `[value, count, ...]` array (JSON default) or `[[value, count], ...]`.
fn parse_facet_buckets(node: &Node) -> Vec<FacetCount> {
    match node {
        Node::Map(entries) => entries
            .iter()
            .filter_map(|(value, c)| {
                count(c).map(|count| FacetCount {
                    value: value.clone(),
                    count,
                })
            })
            .collect(),
        Node::List(items) if items.iter().all(|item| matches!(item, Node::List(_))) => items
            .iter()
            .filter_map(|pair| match pair.items() {
                [value, c] => Some(FacetCount {
                    value: value.as_text().unwrap_or_default().to_string(),
                    count: count(c)?,
                }),
                _ => None,
            })
            .collect(),
        Node::List(items) => items
            .chunks(2)
            .filter_map(|pair| match pair {
                [value, c] => Some(FacetCount {
                    value: value.as_text().unwrap_or_default().to_string(),
                    count: count(c)?,
                }),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_highlightings(node: &Node) -> Highlightings {
    Highlightings {
        documents: node
            .entries()
            .iter()
            .map(|(key, fields)| Highlighting {
                key: key.clone(),
                fields: fields
                    .entries()
                    .iter()
                    .map(|(field, snippets)| {
                        let snippets = match snippets {
                            Node::Scalar(s) => vec![s.clone()],
                            other => other
                                .items()
                                .iter()
                                .filter_map(Node::as_text)
                                .map(str::to_string)
                                .collect(),
                        };
                        (field.clone(), snippets)
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn parse_more_like_this(node: &Node) -> MoreLikeThis {
    MoreLikeThis {
        clusters: node
            .entries()
            .iter()
            .map(|(key, page)| (key.clone(), parse_result_page(page)))
            .collect(),
    }
}
