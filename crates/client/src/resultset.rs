//! Scoped result-set handle and pagination iterators.
//!
//! A [`ResultSet`] binds one open query: it exposes every per-rank
//! operation without repeating the query id, and guarantees the
//! server-side query is released exactly once — explicitly via
//! [`ResultSet::close`], or from `Drop` on every other exit path. A close
//! failure during `Drop` is logged and never masks an error already
//! propagating through the caller.
//!
//! The iterators are lazy, forward-only, and single-pass. Each resolves
//! the total once, at its first `next()` call, and yields `Result` items;
//! after yielding an error it fuses. Stopping early is always safe — close
//! ownership stays with the handle, never with an iterator.

use mimir_protocol::{DocumentHit, DocumentId, DocumentMetadata, DocumentToken, QueryId, SearchResult};
use tracing::warn;

use crate::error::Result;
use crate::session::SearchClient;

/// A resource handle bound to one active query id.
#[derive(Debug)]
pub struct ResultSet<'a> {
    client: &'a SearchClient,
    query_id: QueryId,
    closed: bool,
}

impl<'a> ResultSet<'a> {
    pub(crate) fn new(client: &'a SearchClient, query_id: QueryId) -> Self {
        Self {
            client,
            query_id,
            closed: false,
        }
    }

    /// The backend handle this result set is bound to.
    pub fn query_id(&self) -> &QueryId {
        &self.query_id
    }

    pub(crate) fn wait(&self) -> Result<()> {
        self.client.wait(&self.query_id)
    }

    /// Releases the server-side query and reports the outcome.
    ///
    /// Dropping the handle releases the query too; use this when you want
    /// to observe a close failure instead of having it logged.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.client.close(&self.query_id)
    }

    /// Number of results computed so far.
    pub fn current_count(&self) -> Result<i64> {
        self.client.current_count(&self.query_id)
    }

    /// Total number of results, or `-1` while the query is still executing.
    pub fn total_count(&self) -> Result<i64> {
        self.client.total_count(&self.query_id)
    }

    /// Metadata for the document at `rank`. See
    /// [`SearchClient::document_metadata`] for the `fields` semantics.
    pub fn document_metadata(
        &self,
        rank: u64,
        fields: Option<&[String]>,
    ) -> Result<DocumentMetadata> {
        self.client.document_metadata(&self.query_id, rank, fields)
    }

    /// Stable identifier of the document at `rank`.
    pub fn document_id(&self, rank: u64) -> Result<DocumentId> {
        self.client.document_id(&self.query_id, rank)
    }

    /// Match spans within the document at `rank`.
    pub fn document_hits(&self, rank: u64) -> Result<Vec<DocumentHit>> {
        self.client.document_hits(&self.query_id, rank)
    }

    /// Token sequence for a window of the document at `rank`.
    pub fn document_text_tokens(
        &self,
        rank: u64,
        term_position: u64,
        length: Option<u64>,
    ) -> Result<Vec<DocumentToken>> {
        self.client
            .document_text_tokens(&self.query_id, rank, term_position, length)
    }

    /// The document text window as a single string.
    pub fn document_text(
        &self,
        rank: u64,
        term_position: u64,
        length: Option<u64>,
    ) -> Result<String> {
        self.client
            .document_text(&self.query_id, rank, term_position, length)
    }

    /// HTML rendering of the result at `rank`.
    pub fn render_document(&self, rank: u64) -> Result<String> {
        self.client.render_document(&self.query_id, rank)
    }

    /// Iterates metadata records over ranks `0..total`.
    pub fn metadata(&self, fields: Option<&[String]>) -> MetadataIter<'_> {
        MetadataIter {
            set: self,
            fields: fields.map(<[String]>::to_vec),
            cursor: RankCursor::new(),
        }
    }

    /// Iterates document ids over ranks `0..total`.
    pub fn ids(&self) -> IdIter<'_> {
        IdIter {
            set: self,
            cursor: RankCursor::new(),
        }
    }

    /// Iterates fully assembled [`SearchResult`] records over ranks
    /// `0..total`.
    ///
    /// Each record costs four round trips (metadata, id, tokens, hits) with
    /// no atomicity across them: the backend's result set can grow between
    /// calls, so the parts of one record are not a consistent snapshot. If
    /// any of the four fetches fails, the record fails as a whole; no
    /// partial record is yielded.
    pub fn results(&self, fields: Option<&[String]>) -> ResultIter<'_> {
        ResultIter {
            set: self,
            fields: fields.map(<[String]>::to_vec),
            cursor: RankCursor::new(),
        }
    }
}

impl Drop for ResultSet<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        // Never panic and never mask the in-flight error: report and move on.
        if let Err(error) = self.client.close(&self.query_id) {
            warn!(query_id = %self.query_id, %error, "failed to release backend query");
        }
    }
}

/// Lazy rank counter shared by the three iterators.
///
/// Resolves the total from the backend on first use and never again — the
/// handle has already waited, so the total is stable. Halts permanently
/// after the total fetch fails or after the owning iterator reports a
/// fetch failure.
struct RankCursor {
    next_rank: u64,
    total: Option<u64>,
    halted: bool,
}

impl RankCursor {
    fn new() -> Self {
        Self {
            next_rank: 0,
            total: None,
            halted: false,
        }
    }

    fn step(&mut self, set: &ResultSet<'_>) -> Option<Result<u64>> {
        if self.halted {
            return None;
        }
        let total = match self.total {
            Some(total) => total,
            None => match set.total_count() {
                // A total of -1 means the query has not finished; iterate as empty.
                Ok(count) => {
                    let total = count.max(0) as u64;
                    self.total = Some(total);
                    total
                }
                Err(error) => {
                    self.halted = true;
                    return Some(Err(error));
                }
            },
        };
        if self.next_rank >= total {
            return None;
        }
        let rank = self.next_rank;
        self.next_rank += 1;
        Some(Ok(rank))
    }

    fn halt(&mut self) {
        self.halted = true;
    }
}

/// Iterator over [`DocumentMetadata`] records, yielded in rank order.
pub struct MetadataIter<'a> {
    set: &'a ResultSet<'a>,
    fields: Option<Vec<String>>,
    cursor: RankCursor,
}

impl Iterator for MetadataIter<'_> {
    type Item = Result<DocumentMetadata>;

    fn next(&mut self) -> Option<Self::Item> {
        let rank = match self.cursor.step(self.set)? {
            Ok(rank) => rank,
            Err(error) => return Some(Err(error)),
        };
        let item = self.set.document_metadata(rank, self.fields.as_deref());
        if item.is_err() {
            self.cursor.halt();
        }
        Some(item)
    }
}

/// Iterator over [`DocumentId`]s, yielded in rank order.
pub struct IdIter<'a> {
    set: &'a ResultSet<'a>,
    cursor: RankCursor,
}

impl Iterator for IdIter<'_> {
    type Item = Result<DocumentId>;

    fn next(&mut self) -> Option<Self::Item> {
        let rank = match self.cursor.step(self.set)? {
            Ok(rank) => rank,
            Err(error) => return Some(Err(error)),
        };
        let item = self.set.document_id(rank);
        if item.is_err() {
            self.cursor.halt();
        }
        Some(item)
    }
}

/// Iterator over assembled [`SearchResult`] records, yielded in rank order.
pub struct ResultIter<'a> {
    set: &'a ResultSet<'a>,
    fields: Option<Vec<String>>,
    cursor: RankCursor,
}

impl Iterator for ResultIter<'_> {
    type Item = Result<SearchResult>;

    fn next(&mut self) -> Option<Self::Item> {
        let rank = match self.cursor.step(self.set)? {
            Ok(rank) => rank,
            Err(error) => return Some(Err(error)),
        };
        let item = assemble(self.set, rank, self.fields.as_deref());
        if item.is_err() {
            self.cursor.halt();
        }
        Some(item)
    }
}

fn assemble(set: &ResultSet<'_>, rank: u64, fields: Option<&[String]>) -> Result<SearchResult> {
    Ok(SearchResult {
        metadata: set.document_metadata(rank, fields)?,
        document_id: set.document_id(rank)?,
        tokens: set.document_text_tokens(rank, 0, None)?,
        hits: set.document_hits(rank)?,
    })
}
