//! Newtype identifiers issued by the backend.
//!
//! Both identifiers are backend-assigned and opaque to the client. Wrapping
//! them in distinct newtypes prevents accidentally interchanging a query
//! handle with a document id even where both travel as strings in request
//! parameters.
//!
//! Document *rank* is deliberately not newtyped: it is a zero-based ordinal
//! position within one query's current result set, not a stable identity,
//! and is passed as a plain `u64`.

use serde::{Deserialize, Serialize};

/// Opaque handle for one server-side query, issued by `postQuery`.
///
/// The backend holds state for every open query; a [`QueryId`] must be
/// released with the `close` operation or that state leaks. The client
/// performs no validation beyond rejecting the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryId(String);

impl QueryId {
    /// Creates a query handle, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the handle as a string slice, as sent in the `queryId` parameter.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend-assigned identifier of a physical document.
///
/// Unlike a rank, a [`DocumentId`] is stable across query re-submissions and
/// can be used to render a document without any open query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Creates a document identifier from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
