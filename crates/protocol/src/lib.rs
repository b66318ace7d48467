//! Wire format for the Mímir search backend.
//!
//! The backend answers HTTP GET requests with XML documents namespaced under
//! `http://gate.ac.uk/ns/mimir`. This crate contains everything needed to
//! turn those documents into typed values: the newtype identifiers, the
//! result record types, a minimal namespace-aware element tree, the response
//! envelope check, and one payload decoder per backend operation.
//!
//! ## Architectural Layer
//!
//! **Wire format.** This crate performs no I/O. It decodes response *text*;
//! issuing the requests is the `mimir-client` crate's job. Everything here is
//! testable against fixture strings.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers ([`QueryId`], [`DocumentId`]) |
//! | [`types`] | Result record types (metadata, hits, tokens, assembled results) |
//! | [`xml`] | Namespace-aware element tree built on `quick-xml` |
//! | [`envelope`] | Response envelope: branch on `state` before trusting `data` |
//! | [`decode`] | Per-operation payload decoders |
//! | [`error`] | [`DecodeError`] |

pub mod decode;
pub mod envelope;
pub mod error;
pub mod identifiers;
pub mod types;
pub mod xml;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use decode::{
    decode_count, decode_document_id, decode_hits, decode_metadata, decode_query_id,
    decode_tokens,
};
pub use envelope::{decode_response, ResponseBody, MIMIR_NS};
pub use error::DecodeError;
pub use identifiers::{DocumentId, QueryId};
pub use types::{DocumentHit, DocumentMetadata, DocumentToken, SearchResult};
pub use xml::Element;
