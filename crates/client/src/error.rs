//! The client's three-kind error taxonomy.
//!
//! Every operation fails in exactly one of three ways and none of them is
//! retried by the library:
//!
//! - [`Error::Transport`] — the HTTP round trip itself failed;
//! - [`Error::Protocol`] — the backend answered with `state == ERROR`;
//! - [`Error::Decode`] — the response could not be interpreted.
//!
//! The only recovery behaviour anywhere in the crate is the guaranteed
//! close issued by [`crate::ResultSet`] on drop, which never masks the
//! error already propagating.

use mimir_protocol::DecodeError;
use thiserror::Error;

/// Errors surfaced by every backend operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or HTTP failure before a usable response body existed.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend reported `state == ERROR`.
    ///
    /// The message is the backend's own diagnostic text, preserved verbatim
    /// — callers may match on it exactly (e.g. query-parser diagnostics
    /// with line/column positions).
    #[error("{message}")]
    Protocol {
        /// Backend-supplied diagnostic, unmodified.
        message: String,
    },

    /// The response was not well-formed XML or lacked an expected field.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The configured endpoint is not a usable base URL.
    #[error("invalid endpoint URL '{url}': {message}")]
    Endpoint {
        /// The URL as supplied by the caller.
        url: String,
        /// Why it was rejected.
        message: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
