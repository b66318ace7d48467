//! The session client: one method per backend operation.
//!
//! [`SearchClient`] is the primary entry point. Each method maps directly
//! onto one HTTP GET against the backend and decodes one response shape;
//! there is no cross-call state beyond the [`QueryId`] strings the caller
//! holds. For anything longer than a single probe, prefer
//! [`SearchClient::query`], which returns a scoped [`ResultSet`] handle
//! that guarantees the server-side query is released.

use mimir_protocol::{
    decode_count, decode_document_id, decode_hits, decode_metadata, decode_query_id,
    decode_tokens, DocumentHit, DocumentId, DocumentMetadata, DocumentToken, QueryId,
};

use crate::error::Result;
use crate::resultset::ResultSet;
use crate::transport::Transport;

/// Blocking client for one backend endpoint.
///
/// Cheap to construct; holds only the base URL and the underlying HTTP
/// client. All methods take `&self` — the client issues no concurrent
/// requests of its own, but sharing it across calls is safe because it has
/// no mutable state.
#[derive(Debug)]
pub struct SearchClient {
    transport: Transport,
}

impl SearchClient {
    /// Creates a client for the given base endpoint with a default HTTP client.
    ///
    /// The endpoint is the backend's search URL, e.g.
    /// `http://host:8080/mimir/some-index/search/`. A missing trailing slash
    /// is supplied automatically.
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_http_client(endpoint, reqwest::blocking::Client::new())
    }

    /// Creates a client with a caller-configured [`reqwest::blocking::Client`].
    ///
    /// The library imposes no timeout of its own; configure one here if you
    /// need bounded latency.
    pub fn with_http_client(endpoint: &str, http: reqwest::blocking::Client) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(endpoint, http)?,
        })
    }

    /// Submits a query and returns the backend's opaque handle for it.
    ///
    /// The caller owns the handle and must release it with
    /// [`SearchClient::close`] — or use [`SearchClient::query`], which does
    /// so automatically. Invalid query syntax surfaces as
    /// [`crate::Error::Protocol`] carrying the backend's parser diagnostic.
    pub fn submit_query(&self, query: &str) -> Result<QueryId> {
        let data = self
            .transport
            .get_data("postQuery", &[("queryString", query.to_owned())])?;
        Ok(decode_query_id(&data)?)
    }

    /// Blocks until the backend can report a result count for the query.
    ///
    /// Must be called before retrieving counts or per-rank data. The
    /// response payload itself is not meaningful and is discarded.
    pub fn wait(&self, query_id: &QueryId) -> Result<()> {
        self.transport
            .get_data("documentsCountSync", &[param_query_id(query_id)])?;
        Ok(())
    }

    /// Releases the server-side state held for the query.
    pub fn close(&self, query_id: &QueryId) -> Result<()> {
        self.transport
            .get_data("close", &[param_query_id(query_id)])?;
        Ok(())
    }

    /// Number of results computed so far. May still grow while the query
    /// executes.
    pub fn current_count(&self, query_id: &QueryId) -> Result<i64> {
        let data = self
            .transport
            .get_data("documentsCurrentCount", &[param_query_id(query_id)])?;
        Ok(decode_count(&data)?)
    }

    /// Total number of results, or `-1` while the query is still executing.
    pub fn total_count(&self, query_id: &QueryId) -> Result<i64> {
        let data = self
            .transport
            .get_data("documentsCount", &[param_query_id(query_id)])?;
        Ok(decode_count(&data)?)
    }

    /// Metadata for the document at `rank`.
    ///
    /// `fields` selects additional metadata fields by name. `None` omits
    /// the `fieldNames` parameter entirely, returning only title and URI;
    /// `Some(list)` always sends the comma-joined list, even when empty.
    pub fn document_metadata(
        &self,
        query_id: &QueryId,
        rank: u64,
        fields: Option<&[String]>,
    ) -> Result<DocumentMetadata> {
        let mut params = vec![param_query_id(query_id), ("rank", rank.to_string())];
        if let Some(fields) = fields {
            params.push(("fieldNames", fields.join(",")));
        }
        let data = self.transport.get_data("documentMetadata", &params)?;
        Ok(decode_metadata(&data)?)
    }

    /// Stable identifier of the document at `rank`.
    pub fn document_id(&self, query_id: &QueryId, rank: u64) -> Result<DocumentId> {
        let data = self.transport.get_data(
            "documentId",
            &[param_query_id(query_id), ("rank", rank.to_string())],
        )?;
        Ok(decode_document_id(&data)?)
    }

    /// Match spans within the document at `rank`, in document order.
    pub fn document_hits(&self, query_id: &QueryId, rank: u64) -> Result<Vec<DocumentHit>> {
        let data = self.transport.get_data(
            "documentHits",
            &[param_query_id(query_id), ("rank", rank.to_string())],
        )?;
        Ok(decode_hits(&data)?)
    }

    /// Token sequence of the document at `rank`.
    ///
    /// `term_position` is the window start (pass `0` for the beginning);
    /// `length` limits the window in terms, or `None` for the rest of the
    /// document (the parameter is omitted from the request).
    pub fn document_text_tokens(
        &self,
        query_id: &QueryId,
        rank: u64,
        term_position: u64,
        length: Option<u64>,
    ) -> Result<Vec<DocumentToken>> {
        let mut params = vec![
            param_query_id(query_id),
            ("rank", rank.to_string()),
            ("termPosition", term_position.to_string()),
        ];
        if let Some(length) = length {
            params.push(("length", length.to_string()));
        }
        let data = self.transport.get_data("documentText", &params)?;
        Ok(decode_tokens(&data)?)
    }

    /// The document text window as a single string.
    ///
    /// Pure convenience over [`SearchClient::document_text_tokens`]:
    /// concatenates the token texts in order.
    pub fn document_text(
        &self,
        query_id: &QueryId,
        rank: u64,
        term_position: u64,
        length: Option<u64>,
    ) -> Result<String> {
        let tokens = self.document_text_tokens(query_id, rank, term_position, length)?;
        Ok(tokens.iter().map(|token| token.text.as_str()).collect())
    }

    /// HTML rendering of the result at `rank`, hits highlighted by the backend.
    pub fn render_document(&self, query_id: &QueryId, rank: u64) -> Result<String> {
        self.transport.get_html(
            "renderDocument",
            &[param_query_id(query_id), ("rank", rank.to_string())],
        )
    }

    /// HTML rendering of an entire document by its stable identifier.
    ///
    /// Needs no open query; uses the same endpoint as
    /// [`SearchClient::render_document`] with a `documentId` parameter
    /// instead of a query handle and rank.
    pub fn render_document_by_id(&self, document_id: DocumentId) -> Result<String> {
        self.transport.get_html(
            "renderDocument",
            &[("documentId", document_id.as_u64().to_string())],
        )
    }

    /// Submits a query and returns a scoped [`ResultSet`] handle.
    ///
    /// Submits, then waits for the result count to become determinable.
    /// The handle releases the server-side query when dropped, on every
    /// exit path — including a failure of the initial wait.
    pub fn query(&self, query: &str) -> Result<ResultSet<'_>> {
        let query_id = self.submit_query(query)?;
        let set = ResultSet::new(self, query_id);
        set.wait()?;
        Ok(set)
    }
}

fn param_query_id(query_id: &QueryId) -> (&'static str, String) {
    ("queryId", query_id.as_str().to_owned())
}
