//! Response envelope decoding.
//!
//! Every XML operation wraps its payload the same way:
//!
//! ```xml
//! <message xmlns="http://gate.ac.uk/ns/mimir">
//!   <state>SUCCESS</state>
//!   <data>…operation payload…</data>
//! </message>
//! ```
//!
//! On failure the backend substitutes `<state>ERROR</state>` and an
//! `<error>` element carrying its own diagnostic text. The `state` element
//! must be inspected before trusting `data`; the diagnostic is passed
//! through verbatim — exact-string preservation is part of the contract.

use crate::error::DecodeError;
use crate::xml::Element;

/// Namespace URI of every element in a backend response envelope.
pub const MIMIR_NS: &str = "http://gate.ac.uk/ns/mimir";

/// The `state` value reporting a failed operation.
const STATE_ERROR: &str = "ERROR";

/// Outcome of decoding one response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// The operation succeeded; the `data` subtree carries the payload.
    Data(Element),

    /// The backend reported `state == ERROR`; the diagnostic is verbatim.
    BackendError(String),
}

/// Decodes a response body, branching on `state` before trusting `data`.
///
/// A missing `state` element (or, on the success path, a missing `data`
/// element) is a [`DecodeError`]: it means the response is not the protocol
/// the client speaks, which is fatal rather than something to default.
pub fn decode_response(body: &str) -> Result<ResponseBody, DecodeError> {
    let root = Element::parse(body)?;
    let state = root.expect_child(MIMIR_NS, "state")?.text().trim().to_owned();

    if state == STATE_ERROR {
        let message = root.expect_child(MIMIR_NS, "error")?.text().to_owned();
        return Ok(ResponseBody::BackendError(message));
    }

    let data = root.take_child(MIMIR_NS, "data")?;
    Ok(ResponseBody::Data(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_the_data_subtree() {
        let body = concat!(
            r#"<message xmlns="http://gate.ac.uk/ns/mimir">"#,
            r#"<state>SUCCESS</state><data><queryId>abc</queryId></data>"#,
            r#"</message>"#,
        );
        let ResponseBody::Data(data) = decode_response(body).expect("success envelope") else {
            panic!("expected data");
        };
        assert_eq!(
            data.expect_child(MIMIR_NS, "queryId")
                .expect("queryId child")
                .text(),
            "abc"
        );
    }

    #[test]
    fn error_state_carries_the_diagnostic_verbatim() {
        let diagnostic = "Parse error at line 1, column 7: unbalanced brace";
        let body = format!(
            r#"<message xmlns="http://gate.ac.uk/ns/mimir"><state>ERROR</state><error>{diagnostic}</error></message>"#,
        );
        let outcome = decode_response(&body).expect("well-formed envelope");
        assert_eq!(outcome, ResponseBody::BackendError(diagnostic.to_owned()));
    }

    #[test]
    fn missing_state_is_a_decode_error() {
        let body = r#"<message xmlns="http://gate.ac.uk/ns/mimir"><data/></message>"#;
        let error = decode_response(body).expect_err("no state element");
        assert!(matches!(error, DecodeError::MissingElement { name } if name == "state"));
    }

    #[test]
    fn missing_data_on_success_is_a_decode_error() {
        let body =
            r#"<message xmlns="http://gate.ac.uk/ns/mimir"><state>SUCCESS</state></message>"#;
        let error = decode_response(body).expect_err("no data element");
        assert!(matches!(error, DecodeError::MissingElement { name } if name == "data"));
    }

    #[test]
    fn non_xml_body_is_a_decode_error() {
        let error = decode_response("<html>gateway timeout").expect_err("not well-formed");
        assert!(matches!(
            error,
            DecodeError::Xml(_) | DecodeError::EmptyDocument
        ));
    }
}
