//! Blocking client for the Mímir search backend.
//!
//! The backend runs queries server-side and speaks a small XML-over-HTTP
//! protocol: submit a query, wait for a count, fetch per-rank metadata /
//! ids / hit spans / tokenized text, and close the query to release its
//! server-side state. This crate wraps that protocol in three layers:
//!
//! - [`SearchClient`] — one method per backend operation;
//! - [`ResultSet`] — a scoped handle bound to one query id, released
//!   automatically on drop;
//! - pagination iterators ([`MetadataIter`], [`IdIter`], [`ResultIter`])
//!   that walk ranks `0..total` lazily.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport and the error taxonomy live here;
//! the wire format (records, envelope, payload decoding) lives in
//! [`mimir_protocol`] and is re-exported for convenience.
//!
//! ## Concurrency Model
//!
//! Single-threaded, synchronous, blocking I/O: every operation is one HTTP
//! round trip and returns only after the response is fully received and
//! decoded. The library issues no concurrent requests, retries nothing,
//! and imposes no timeout — pass a pre-configured
//! [`reqwest::blocking::Client`] to [`SearchClient::with_http_client`] for
//! bounded latency. The backend's result set is externally mutable and can
//! grow between calls; callers must not assume a snapshot.
//!
//! ## Example
//!
//! ```no_run
//! use mimir_client::SearchClient;
//!
//! # fn main() -> Result<(), mimir_client::Error> {
//! let client = SearchClient::new("http://localhost:8080/mimir/news/search/")?;
//! let set = client.query("{Person} root:say")?;
//! let fields = vec!["author".to_owned()];
//! for record in set.metadata(Some(&fields)) {
//!     let record = record?;
//!     println!("{} <{}>", record.title, record.uri);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
mod resultset;
mod session;
mod transport;

pub use error::{Error, Result};
pub use resultset::{IdIter, MetadataIter, ResultIter, ResultSet};
pub use session::SearchClient;

// Re-export the wire-format types callers handle directly.
pub use mimir_protocol::{
    DecodeError, DocumentHit, DocumentId, DocumentMetadata, DocumentToken, QueryId, SearchResult,
};
