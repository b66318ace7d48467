//! Decoding errors.
//!
//! A [`DecodeError`] means the response could not be interpreted as the
//! protocol requires — either the body was not well-formed XML, or a field
//! the protocol guarantees was absent or unparseable. Both indicate a
//! client/backend mismatch; nothing here is retried and nothing is silently
//! defaulted.

use thiserror::Error;

/// Errors produced while decoding a backend XML response.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The response body was not well-formed XML.
    #[error("malformed XML response: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The response body contained no root element.
    #[error("empty response document")]
    EmptyDocument,

    /// An element required by the protocol was absent.
    #[error("missing expected element '{name}'")]
    MissingElement {
        /// Local name of the element that was expected.
        name: String,
    },

    /// An attribute required by the protocol was absent.
    #[error("missing expected attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Local name of the element the attribute was expected on.
        element: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// A field the protocol defines as an integer did not parse as one.
    #[error("invalid integer in {context}: {source}")]
    InvalidNumber {
        /// Which protocol field was being parsed.
        context: String,
        /// The underlying parse failure.
        #[source]
        source: std::num::ParseIntError,
    },

    /// A field was present but carried a value the protocol forbids.
    #[error("invalid value in {context}: {reason}")]
    InvalidValue {
        /// Which protocol field was being decoded.
        context: String,
        /// Why the value was rejected.
        reason: String,
    },
}
