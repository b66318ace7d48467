//! Per-operation payload decoders.
//!
//! Each function takes the `data` subtree produced by
//! [`crate::envelope::decode_response`] and extracts the shape one backend
//! operation returns. Missing elements, missing attributes, and unparseable
//! integers are all fatal [`DecodeError`]s — the protocol never calls for a
//! defaulted value.

use crate::envelope::MIMIR_NS;
use crate::error::DecodeError;
use crate::identifiers::{DocumentId, QueryId};
use crate::types::{DocumentHit, DocumentMetadata, DocumentToken};
use crate::xml::Element;

/// Decodes the `postQuery` payload: `data/queryId`.
pub fn decode_query_id(data: &Element) -> Result<QueryId, DecodeError> {
    let text = data.expect_child(MIMIR_NS, "queryId")?.text().trim().to_owned();
    QueryId::new(text).ok_or_else(|| DecodeError::InvalidValue {
        context: "queryId".to_owned(),
        reason: "backend returned an empty query handle".to_owned(),
    })
}

/// Decodes a count payload: `data/value` as a signed integer.
///
/// `documentsCount` uses `-1` as a "not yet complete" sentinel, so the
/// value is signed even though real counts are non-negative.
pub fn decode_count(data: &Element) -> Result<i64, DecodeError> {
    let value = data.expect_child(MIMIR_NS, "value")?;
    parse_int(value.text(), "value")
}

/// Decodes the `documentId` payload: `data/value` as a document identifier.
pub fn decode_document_id(data: &Element) -> Result<DocumentId, DecodeError> {
    let value = data.expect_child(MIMIR_NS, "value")?;
    Ok(DocumentId::new(parse_int(value.text(), "value")?))
}

/// Decodes the `documentMetadata` payload: title, URI, and any
/// `metadataField` elements (name/value attribute pairs).
pub fn decode_metadata(data: &Element) -> Result<DocumentMetadata, DecodeError> {
    let uri = data.expect_child(MIMIR_NS, "documentURI")?.text().to_owned();
    let title = data
        .expect_child(MIMIR_NS, "documentTitle")?
        .text()
        .to_owned();

    let mut fields = std::collections::HashMap::new();
    for field in data.children_named(MIMIR_NS, "metadataField") {
        let name = field.expect_attribute("name")?.to_owned();
        let value = field.expect_attribute("value")?.to_owned();
        fields.insert(name, value);
    }

    Ok(DocumentMetadata { title, uri, fields })
}

/// Decodes the `documentHits` payload: `data/hits/hit*` in document order.
pub fn decode_hits(data: &Element) -> Result<Vec<DocumentHit>, DecodeError> {
    let container = data.expect_child(MIMIR_NS, "hits")?;
    let mut hits = Vec::new();
    for hit in container.children_named(MIMIR_NS, "hit") {
        hits.push(DocumentHit {
            document_id: DocumentId::new(parse_int(
                hit.expect_attribute("documentId")?,
                "hit documentId",
            )?),
            term_position: parse_int(hit.expect_attribute("termPosition")?, "hit termPosition")?,
            length: parse_int(hit.expect_attribute("length")?, "hit length")?,
        });
    }
    Ok(hits)
}

/// Decodes the `documentText` payload into an ordered token sequence.
///
/// Every child of `data` is one token. A child whose local name is `text`
/// is a content token and must carry a `position` attribute; a child with
/// any other name is a whitespace/separator token with no position. Child
/// order is the document order and must be preserved — concatenating the
/// token texts reproduces the rendered text window.
pub fn decode_tokens(data: &Element) -> Result<Vec<DocumentToken>, DecodeError> {
    let mut tokens = Vec::new();
    for child in data.children() {
        if child.name() == "text" {
            let position = parse_int(child.expect_attribute("position")?, "token position")?;
            tokens.push(DocumentToken {
                text: child.text().to_owned(),
                position: Some(position),
                is_space: false,
            });
        } else {
            tokens.push(DocumentToken {
                text: child.text().to_owned(),
                position: None,
                is_space: true,
            });
        }
    }
    Ok(tokens)
}

fn parse_int<T>(text: &str, context: &str) -> Result<T, DecodeError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    text.trim()
        .parse()
        .map_err(|source| DecodeError::InvalidNumber {
            context: context.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{decode_response, ResponseBody};

    fn data_of(payload: &str) -> Element {
        let body = format!(
            r#"<message xmlns="http://gate.ac.uk/ns/mimir"><state>SUCCESS</state><data>{payload}</data></message>"#,
        );
        match decode_response(&body).expect("well-formed envelope") {
            ResponseBody::Data(data) => data,
            ResponseBody::BackendError(message) => panic!("unexpected backend error: {message}"),
        }
    }

    #[test]
    fn query_id_is_extracted_and_must_be_non_empty() {
        let id = decode_query_id(&data_of("<queryId>f3a1</queryId>")).expect("handle");
        assert_eq!(id.as_str(), "f3a1");

        let error = decode_query_id(&data_of("<queryId></queryId>")).expect_err("empty handle");
        assert!(matches!(error, DecodeError::InvalidValue { .. }));
    }

    #[test]
    fn counts_accept_the_incomplete_sentinel() {
        assert_eq!(decode_count(&data_of("<value>42</value>")).expect("count"), 42);
        assert_eq!(decode_count(&data_of("<value>-1</value>")).expect("count"), -1);

        let error = decode_count(&data_of("<value>soon</value>")).expect_err("not a number");
        assert!(matches!(error, DecodeError::InvalidNumber { .. }));
    }

    #[test]
    fn metadata_without_fields_has_an_empty_map() {
        let payload = concat!(
            "<documentTitle>Tristram Shandy</documentTitle>",
            "<documentURI>http://example.org/shandy</documentURI>",
        );
        let metadata = decode_metadata(&data_of(payload)).expect("metadata");
        assert_eq!(metadata.title, "Tristram Shandy");
        assert_eq!(metadata.uri, "http://example.org/shandy");
        assert!(metadata.fields.is_empty());
    }

    #[test]
    fn metadata_fields_are_keyed_by_name() {
        let payload = concat!(
            "<documentTitle>t</documentTitle>",
            "<documentURI>u</documentURI>",
            r#"<metadataField name="author" value="Sterne"/>"#,
        );
        let metadata = decode_metadata(&data_of(payload)).expect("metadata");
        assert_eq!(metadata.fields.len(), 1);
        assert_eq!(metadata.fields.get("author").map(String::as_str), Some("Sterne"));
    }

    #[test]
    fn metadata_without_title_is_a_decode_error() {
        let error = decode_metadata(&data_of("<documentURI>u</documentURI>"))
            .expect_err("no title element");
        assert!(matches!(error, DecodeError::MissingElement { name } if name == "documentTitle"));
    }

    #[test]
    fn hits_preserve_document_order() {
        let payload = concat!(
            "<hits>",
            r#"<hit documentId="7" termPosition="3" length="2"/>"#,
            r#"<hit documentId="7" termPosition="11" length="1"/>"#,
            "</hits>",
        );
        let hits = decode_hits(&data_of(payload)).expect("hits");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].term_position, 3);
        assert_eq!(hits[1].term_position, 11);
        assert_eq!(hits[0].document_id, DocumentId::new(7));
    }

    #[test]
    fn hit_without_length_is_a_decode_error() {
        let payload = r#"<hits><hit documentId="7" termPosition="3"/></hits>"#;
        let error = decode_hits(&data_of(payload)).expect_err("no length attribute");
        assert!(
            matches!(error, DecodeError::MissingAttribute { attribute, .. } if attribute == "length")
        );
    }

    #[test]
    fn tokens_distinguish_content_from_whitespace() {
        let payload = concat!(
            r#"<text position="0">The</text>"#,
            "<space> </space>",
            r#"<text position="1">end</text>"#,
            "<space>.</space>",
        );
        let tokens = decode_tokens(&data_of(payload)).expect("tokens");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].position, Some(0));
        assert!(!tokens[0].is_space);
        assert_eq!(tokens[1].position, None);
        assert!(tokens[1].is_space);

        let window: String = tokens.iter().map(|token| token.text.as_str()).collect();
        assert_eq!(window, "The end.");
    }

    #[test]
    fn content_token_without_position_is_a_decode_error() {
        let error = decode_tokens(&data_of("<text>The</text>")).expect_err("no position");
        assert!(
            matches!(error, DecodeError::MissingAttribute { attribute, .. } if attribute == "position")
        );
    }
}
