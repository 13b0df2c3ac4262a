//! Command line definition and dispatch onto client operations.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use crate::CliError;
use solr_client_repository::{
    AddRequest, DeleteRequest, DihCommandRequest, PingRequest, QueryRequest, SolrClient,
    UpdateRequest,
};
use solr_client_shared::{Document, SolrResponse, WireFormat};

#[derive(Parser, Debug)]
#[command(name = "solr")]
#[command(about = "Talk to a Solr server over HTTP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Solr base URL (overrides SOLR_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Core name (overrides SOLR_CORE)
    #[arg(long, global = true)]
    pub core: Option<String>,

    /// Response wire format, xml or json (overrides SOLR_WIRE_FORMAT)
    #[arg(long, global = true)]
    pub format: Option<WireFormat>,

    /// How to print the decoded response
    #[arg(long, value_enum, default_value_t = OutputMode::Summary, global = true)]
    pub output: OutputMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human readable summary
    Summary,
    /// The typed response as JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the index
    Query(QueryArgs),
    /// Check that the server is alive
    Ping,
    /// Commit pending changes
    Commit,
    /// Optimize the index
    Optimize,
    /// Discard uncommitted changes
    Rollback,
    /// Add one document built from --field pairs
    Add(AddArgs),
    /// Delete documents by unique key and/or query
    Delete(DeleteArgs),
    /// Send a raw update message from a file, or stdin with "-"
    Update(UpdateArgs),
    /// Run a data import handler command
    Dih(DihArgs),
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Query string, e.g. "author:Rick"
    pub q: String,

    /// Fields to return
    #[arg(long = "fl", value_delimiter = ',')]
    pub fields: Vec<String>,

    #[arg(long)]
    pub start: Option<u64>,

    #[arg(long)]
    pub rows: Option<u64>,

    /// Sort clause, e.g. "price desc"
    #[arg(long)]
    pub sort: Option<String>,

    /// Filter queries
    #[arg(long = "fq")]
    pub filter_queries: Vec<String>,

    #[arg(long = "facet-field")]
    pub facet_fields: Vec<String>,

    #[arg(long = "facet-query")]
    pub facet_queries: Vec<String>,

    /// Fields to highlight
    #[arg(long = "hl", value_delimiter = ',')]
    pub highlight_fields: Vec<String>,

    /// Fields used to find similar documents
    #[arg(long = "mlt", value_delimiter = ',')]
    pub more_like_this_fields: Vec<String>,

    /// Extra parameters as name=value
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Field as name=value; repeat a name for a multi-valued field
    #[arg(long = "field", value_parser = parse_key_value, required = true)]
    pub fields: Vec<(String, String)>,

    /// Commit in the same request
    #[arg(long)]
    pub commit: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Unique keys to delete
    #[arg(long = "id")]
    pub ids: Vec<String>,

    /// Delete-by-query expressions
    #[arg(long = "query")]
    pub queries: Vec<String>,

    /// Commit in the same request
    #[arg(long)]
    pub commit: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Message file, or "-" for stdin
    pub file: PathBuf,

    /// Treat the message as a JSON update instead of XML
    #[arg(long)]
    pub json: bool,

    /// Commit in the same request
    #[arg(long)]
    pub commit: bool,
}

#[derive(Args, Debug)]
pub struct DihArgs {
    /// Command such as full-import, delta-import, status or abort
    pub command: String,

    /// Handler path when not mounted at /dataimport
    #[arg(long)]
    pub handler: Option<String>,

    /// Extra parameters as name=value, e.g. clean=false
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

/// Parse a `name=value` pair. The value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got {:?}", raw)),
    }
}

impl QueryArgs {
    pub fn to_request(&self) -> QueryRequest {
        let mut request = QueryRequest::new(self.q.clone());

        if !self.fields.is_empty() {
            request = request.with_fields(&as_strs(&self.fields));
        }
        if let Some(start) = self.start {
            request = request.with_start(start);
        }
        if let Some(rows) = self.rows {
            request = request.with_rows(rows);
        }
        if let Some(sort) = &self.sort {
            request = request.with_param("sort", sort.clone());
        }
        for filter in &self.filter_queries {
            request = request.with_filter_query(filter.clone());
        }
        if !self.facet_fields.is_empty() {
            request = request.with_facet_fields(&as_strs(&self.facet_fields));
        }
        for query in &self.facet_queries {
            request = request.with_facet_query(query.clone());
        }
        if !self.highlight_fields.is_empty() {
            request = request.with_highlighting(&as_strs(&self.highlight_fields));
        }
        if !self.more_like_this_fields.is_empty() {
            request = request.with_more_like_this(&as_strs(&self.more_like_this_fields), None);
        }
        for (name, value) in &self.params {
            request.add(name.clone(), value.clone());
        }
        request
    }
}

impl AddArgs {
    pub fn to_request(&self) -> AddRequest {
        let mut document = Document::new();
        for (name, value) in &self.fields {
            document.push_value(name.clone(), value.clone());
        }
        let mut request = AddRequest::new(vec![document]);
        if self.commit {
            request.set("commit", "true");
        }
        request
    }
}

impl DeleteArgs {
    pub fn to_request(&self) -> DeleteRequest {
        let mut request = DeleteRequest::new();
        request.set_unique_keys(self.ids.iter().cloned());
        for query in &self.queries {
            request = request.with_query(query.clone());
        }
        if self.commit {
            request.set("commit", "true");
        }
        request
    }
}

impl UpdateArgs {
    /// Build the update request from a message body.
    pub fn to_request(&self, body: &str) -> Result<UpdateRequest, CliError> {
        let request = if self.json {
            let value: serde_json::Value = serde_json::from_str(body)?;
            UpdateRequest::json(&value)?
        } else {
            UpdateRequest::xml(body)
        };
        Ok(if self.commit {
            request.with_commit()
        } else {
            request
        })
    }

    fn read_body(&self) -> Result<String, CliError> {
        if self.file.as_os_str() == "-" {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        } else {
            Ok(std::fs::read_to_string(&self.file)?)
        }
    }
}

impl DihArgs {
    pub fn to_request(&self) -> DihCommandRequest {
        let mut request = DihCommandRequest::new(self.command.clone());
        if let Some(handler) = &self.handler {
            request = request.with_handler_path(handler.clone());
        }
        for (name, value) in &self.params {
            request.set(name.clone(), value.clone());
        }
        request
    }
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

/// Execute a subcommand and return the typed response.
pub async fn run(command: &Command, client: &SolrClient) -> Result<SolrResponse, CliError> {
    let response = match command {
        Command::Query(args) => SolrResponse::Query(client.do_query(&args.to_request()).await?),
        Command::Ping => SolrResponse::Ping(client.do_ping(&PingRequest::new()).await?),
        Command::Commit => SolrResponse::Update(client.do_commit(&UpdateRequest::new()).await?),
        Command::Optimize => {
            SolrResponse::Update(client.do_optimize(&UpdateRequest::new()).await?)
        }
        Command::Rollback => {
            SolrResponse::Update(client.do_rollback(&UpdateRequest::new()).await?)
        }
        Command::Add(args) => {
            SolrResponse::Update(client.do_add_documents(&args.to_request()).await?)
        }
        Command::Delete(args) => {
            SolrResponse::Update(client.do_delete_documents(&args.to_request()).await?)
        }
        Command::Update(args) => {
            let request = args.to_request(&args.read_body()?)?;
            let response = if args.json {
                client.do_update_in_json(&request).await?
            } else {
                client.do_update_in_xml(&request).await?
            };
            SolrResponse::Update(response)
        }
        Command::Dih(args) => {
            SolrResponse::DihCommand(client.do_dih_command(&args.to_request()).await?)
        }
    };

    info!(
        status = response.header().status,
        qtime_ms = response.header().query_time_ms,
        "Command completed"
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use solr_client_repository::{SolrError, SolrTransport, WireRequest, WireResponse};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const OK_XML: &str = "<response><lst name=\"responseHeader\"><int name=\"status\">0</int><int name=\"QTime\">4</int></lst></response>";

    struct RecordingTransport {
        requests: Mutex<Vec<WireRequest>>,
    }

    #[async_trait]
    impl SolrTransport for RecordingTransport {
        async fn execute(&self, request: &WireRequest) -> Result<WireResponse, SolrError> {
            self.requests.lock().await.push(request.clone());
            Ok(WireResponse {
                status: 200,
                body: OK_XML.as_bytes().to_vec(),
            })
        }
    }

    fn recording() -> (Arc<RecordingTransport>, SolrClient) {
        let transport = Arc::new(RecordingTransport {
            requests: Mutex::new(Vec::new()),
        });
        let client = SolrClient::new(transport.clone());
        (transport, client)
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("fq=price:[0 TO 10]"),
            Ok(("fq".to_string(), "price:[0 TO 10]".to_string()))
        );
        assert_eq!(
            parse_key_value("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "solr", "--core", "books", "--format", "json", "query", "author:Rick", "--fl",
            "id,author", "--rows", "5", "--fq", "inStock:true", "--param", "defType=edismax",
        ])
        .unwrap();

        assert_eq!(cli.core.as_deref(), Some("books"));
        assert_eq!(cli.format, Some(WireFormat::Json));
        assert_eq!(cli.output, OutputMode::Summary);

        let Command::Query(args) = cli.command else {
            panic!("expected query command");
        };
        let request = args.to_request();
        let params = request.params();
        assert_eq!(params.get("q"), Some("author:Rick"));
        assert_eq!(params.get("fl"), Some("id,author"));
        assert_eq!(params.get("rows"), Some("5"));
        assert_eq!(params.get("fq"), Some("inStock:true"));
        assert_eq!(params.get("defType"), Some("edismax"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["solr", "--format", "csv", "ping"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_merges_repeated_fields() {
        let cli = Cli::try_parse_from([
            "solr", "add", "--field", "id=1", "--field", "cat=book", "--field", "cat=paperback",
        ])
        .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add command");
        };

        let request = args.to_request();
        let document = &request.documents()[0];
        assert_eq!(document.get("id").as_string(), "1");
        assert_eq!(
            document.get("cat").as_list(None),
            Some(vec!["book".to_string(), "paperback".to_string()])
        );
    }

    #[test]
    fn test_update_args_json_body() {
        let args = UpdateArgs {
            file: PathBuf::from("-"),
            json: true,
            commit: true,
        };
        let request = args.to_request(r#"[{"id":"1"}]"#).unwrap();
        assert!(request.body().is_some_and(|body| body.is_json()));
        assert_eq!(request.params().get("commit"), Some("true"));

        assert!(matches!(
            args.to_request("not json"),
            Err(CliError::JsonError(_))
        ));
    }

    #[tokio::test]
    async fn test_run_delete_then_commit() {
        let (transport, client) = recording();

        let delete = Command::Delete(DeleteArgs {
            ids: vec!["978-0641723445".to_string()],
            queries: Vec::new(),
            commit: false,
        });
        let response = run(&delete, &client).await.unwrap();
        assert!(matches!(response, SolrResponse::Update(_)));
        run(&Command::Commit, &client).await.unwrap();

        let requests = transport.requests.lock().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].body.as_ref().map(|b| b.content.as_str()),
            Some("<delete><id>978-0641723445</id></delete>")
        );
        assert_eq!(
            requests[1].body.as_ref().map(|b| b.content.as_str()),
            Some("<commit/>")
        );
    }

    #[tokio::test]
    async fn test_run_empty_delete_is_invalid() {
        let (transport, client) = recording();
        let delete = Command::Delete(DeleteArgs {
            ids: Vec::new(),
            queries: Vec::new(),
            commit: false,
        });

        let result = run(&delete, &client).await;

        assert!(matches!(
            result,
            Err(CliError::SolrError(SolrError::InvalidRequest(_)))
        ));
        assert!(transport.requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_dih_uses_handler_path() {
        let (transport, client) = recording();
        let cli = Cli::try_parse_from([
            "solr", "dih", "delta-import", "--handler", "imports", "--param", "clean=false",
        ])
        .unwrap();

        run(&cli.command, &client).await.unwrap();

        let requests = transport.requests.lock().await;
        assert_eq!(requests[0].path, "/imports");
        assert_eq!(requests[0].params.get("command"), Some("delta-import"));
        assert_eq!(requests[0].params.get("clean"), Some("false"));
    }
}
