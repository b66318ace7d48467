//! Result record types.
//!
//! Every type here is a transient value: rebuilt on each fetch, immutable
//! once returned, and held only as long as the caller keeps it. The library
//! caches nothing between calls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::identifiers::DocumentId;

/// Metadata for one document at one rank of a result set.
///
/// The `fields` map is populated only for the field names the caller asked
/// for; with no field names requested it is empty and only the title and
/// URI carry data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Human-readable document title.
    pub title: String,

    /// URI the document was indexed under.
    pub uri: String,

    /// Requested metadata fields, keyed by field name. Keys are unique;
    /// ordering is not meaningful.
    pub fields: HashMap<String, String>,
}

/// One match span of the query terms within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHit {
    /// Document the span belongs to.
    pub document_id: DocumentId,

    /// Zero-based position of the first matched term.
    pub term_position: u64,

    /// Number of terms covered by the match.
    pub length: u64,
}

/// A minimal lexical unit of document text.
///
/// Tokens arrive in document order; concatenating their `text` in that order
/// reproduces the rendered text window exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentToken {
    /// The token's text, including any whitespace it represents.
    pub text: String,

    /// Term position of a content token. `None` for whitespace/separator
    /// tokens, which have no position in the term stream.
    pub position: Option<u64>,

    /// `true` for whitespace/separator tokens.
    pub is_space: bool,
}

/// A fully assembled result record for one rank.
///
/// Assembled from four separate backend fetches (metadata, id, tokens,
/// hits). The backend's result set can grow between those calls, so the
/// four parts are not guaranteed to be a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title, URI, and requested metadata fields.
    pub metadata: DocumentMetadata,

    /// Stable identifier of the document at this rank.
    pub document_id: DocumentId,

    /// Full token sequence of the document, in document order.
    pub tokens: Vec<DocumentToken>,

    /// Match spans within the document, in document order.
    pub hits: Vec<DocumentHit>,
}

impl SearchResult {
    /// Returns the document text, reconstructed by concatenating the token
    /// texts in order.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|token| token.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_text_concatenates_tokens_in_order() {
        let result = SearchResult {
            metadata: DocumentMetadata {
                title: "t".to_owned(),
                uri: "u".to_owned(),
                fields: HashMap::new(),
            },
            document_id: DocumentId::new(1),
            tokens: vec![
                DocumentToken {
                    text: "The".to_owned(),
                    position: Some(0),
                    is_space: false,
                },
                DocumentToken {
                    text: " ".to_owned(),
                    position: None,
                    is_space: true,
                },
                DocumentToken {
                    text: "end".to_owned(),
                    position: Some(1),
                    is_space: false,
                },
            ],
            hits: Vec::new(),
        };
        assert_eq!(result.text(), "The end");
    }
}
