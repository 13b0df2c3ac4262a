//! Solr client implementation.
//!
//! This module provides the main client for talking to the engine.
//! Application code uses it to query, update, delete, commit, optimize,
//! roll back, ping and drive the data import handler.

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::config::SolrClientConfig;
use crate::errors::SolrError;
use crate::interfaces::{SolrTransport, WireRequest};
use crate::request::{
    AddRequest, DeleteRequest, DihCommandRequest, PingRequest, QueryRequest, SolrRequest,
    UpdateRequest,
};
use crate::response::ResponseParser;
use solr_client_shared::{
    DeleteResponse, DihCommandResponse, PingResponse, QueryResponse, SolrResponse, UpdateResponse,
};

/// The main client for interacting with a Solr server.
///
/// The client holds no per-call state: one instance can be shared across
/// tasks and reused for any sequence of operations.
#[derive(Clone)]
pub struct SolrClient {
    transport: Arc<dyn SolrTransport>,
    config: SolrClientConfig,
}

impl SolrClient {
    /// Create a new SolrClient with default configuration.
    pub fn new(transport: Arc<dyn SolrTransport>) -> Self {
        Self {
            transport,
            config: SolrClientConfig::default(),
        }
    }

    /// Create a new SolrClient with custom configuration.
    pub fn with_config(transport: Arc<dyn SolrTransport>, config: SolrClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &SolrClientConfig {
        &self.config
    }

    /// Send any request and decode the matching response.
    pub async fn execute(&self, request: &SolrRequest) -> Result<SolrResponse, SolrError> {
        let (wire, payload) = self.send(request).await?;
        ResponseParser::parse(wire.kind, wire.format, &payload)
    }

    /// Run a search against `/select`.
    #[instrument(skip(self, request), fields(q = %request.query()))]
    pub async fn do_query(&self, request: &QueryRequest) -> Result<QueryResponse, SolrError> {
        let (wire, payload) = self.send(&SolrRequest::Query(request.clone())).await?;
        ResponseParser::parse_query(wire.format, &payload)
    }

    /// Send a raw XML update message. A request without a body is valid.
    #[instrument(skip(self, request))]
    pub async fn do_update_in_xml(
        &self,
        request: &UpdateRequest,
    ) -> Result<UpdateResponse, SolrError> {
        if request.body().is_some_and(|body| body.is_json()) {
            return Err(SolrError::invalid_request(
                "do_update_in_xml called with a JSON body",
            ));
        }
        self.update(SolrRequest::Update(request.clone())).await
    }

    /// Send a JSON update message built with [`UpdateRequest::json`].
    #[instrument(skip(self, request))]
    pub async fn do_update_in_json(
        &self,
        request: &UpdateRequest,
    ) -> Result<UpdateResponse, SolrError> {
        if !request.body().is_some_and(|body| body.is_json()) {
            return Err(SolrError::invalid_request(
                "do_update_in_json needs a JSON body",
            ));
        }
        self.update(SolrRequest::Update(request.clone())).await
    }

    /// Add or replace documents.
    #[instrument(skip(self, request), fields(documents = request.documents().len()))]
    pub async fn do_add_documents(
        &self,
        request: &AddRequest,
    ) -> Result<UpdateResponse, SolrError> {
        self.update(SolrRequest::Update(request.to_update_request()?))
            .await
    }

    /// Delete documents by unique key and/or query.
    #[instrument(skip(self, request), fields(keys = request.unique_keys().len()))]
    pub async fn do_delete_documents(
        &self,
        request: &DeleteRequest,
    ) -> Result<DeleteResponse, SolrError> {
        self.update(SolrRequest::Delete(request.clone())).await
    }

    /// Commit pending changes.
    #[instrument(skip(self, request))]
    pub async fn do_commit(&self, request: &UpdateRequest) -> Result<UpdateResponse, SolrError> {
        self.update(SolrRequest::Commit(request.clone())).await
    }

    /// Optimize the index.
    #[instrument(skip(self, request))]
    pub async fn do_optimize(&self, request: &UpdateRequest) -> Result<UpdateResponse, SolrError> {
        self.update(SolrRequest::Optimize(request.clone())).await
    }

    /// Discard uncommitted changes.
    #[instrument(skip(self, request))]
    pub async fn do_rollback(&self, request: &UpdateRequest) -> Result<UpdateResponse, SolrError> {
        self.update(SolrRequest::Rollback(request.clone())).await
    }

    /// Check that the engine is alive.
    #[instrument(skip(self, request))]
    pub async fn do_ping(&self, request: &PingRequest) -> Result<PingResponse, SolrError> {
        let (wire, payload) = self.send(&SolrRequest::Ping(request.clone())).await?;
        ResponseParser::parse_ping(wire.format, &payload)
    }

    /// Issue a data import handler command such as `delta-import`.
    #[instrument(skip(self, request), fields(command = %request.command()))]
    pub async fn do_dih_command(
        &self,
        request: &DihCommandRequest,
    ) -> Result<DihCommandResponse, SolrError> {
        let (wire, payload) = self.send(&SolrRequest::DihCommand(request.clone())).await?;
        let response = ResponseParser::parse_dih_command(wire.format, &payload)?;
        info!(
            command = %response.command,
            status = ?response.status,
            "DIH command answered"
        );
        Ok(response)
    }

    async fn update(&self, request: SolrRequest) -> Result<UpdateResponse, SolrError> {
        let (wire, payload) = self.send(&request).await?;
        ResponseParser::parse_update(wire.format, &payload)
    }

    /// Serialize, exchange and check the HTTP status. Transport errors are
    /// returned unchanged.
    async fn send(&self, request: &SolrRequest) -> Result<(WireRequest, Vec<u8>), SolrError> {
        let wire = request.to_wire(self.config.core.as_deref(), self.config.wire_format)?;

        debug!(
            kind = %wire.kind,
            method = %wire.method,
            path = %wire.path,
            format = %wire.format,
            "Sending Solr request"
        );

        let response = self.transport.execute(&wire).await?;

        if !response.is_success() {
            let body = response.body_text();
            error!(status = response.status, body = %body, kind = %wire.kind, "Solr request failed");
            return Err(SolrError::http_status(response.status, body));
        }

        Ok((wire, response.body))
    }
}
