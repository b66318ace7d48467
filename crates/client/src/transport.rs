//! Blocking HTTP transport.
//!
//! One struct, two request shapes: XML operations (enveloped, parsed, and
//! mapped onto the error taxonomy) and the render operation (raw HTML, no
//! envelope, so only HTTP status can signal failure). Every call is a
//! single synchronous round trip; the transport holds no mutable state and
//! imposes no timeout — callers who need bounded latency configure one on
//! the [`reqwest::blocking::Client`] they pass in.

use mimir_protocol::{decode_response, Element, ResponseBody};
use reqwest::Url;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug)]
pub(crate) struct Transport {
    endpoint: Url,
    http: reqwest::blocking::Client,
}

impl Transport {
    pub(crate) fn new(endpoint: &str, http: reqwest::blocking::Client) -> Result<Self> {
        let mut parsed = Url::parse(endpoint).map_err(|error| Error::Endpoint {
            url: endpoint.to_owned(),
            message: error.to_string(),
        })?;
        // Joining a relative operation path replaces the last path segment
        // unless the base ends with a slash.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self {
            endpoint: parsed,
            http,
        })
    }

    fn url_for(&self, operation: &str) -> Result<Url> {
        self.endpoint.join(operation).map_err(|error| Error::Endpoint {
            url: format!("{}{operation}", self.endpoint),
            message: error.to_string(),
        })
    }

    /// Issues one XML operation and returns its `data` subtree.
    ///
    /// The body is parsed regardless of HTTP status: the backend wraps its
    /// own failures in the XML envelope, and those must surface as
    /// [`Error::Protocol`] with the diagnostic intact.
    pub(crate) fn get_data(&self, operation: &str, params: &[(&str, String)]) -> Result<Element> {
        let url = self.url_for(operation)?;
        debug!(operation, "issuing backend request");
        let body = self.http.get(url).query(params).send()?.text()?;
        match decode_response(&body)? {
            ResponseBody::Data(data) => Ok(data),
            ResponseBody::BackendError(message) => Err(Error::Protocol { message }),
        }
    }

    /// Issues the render operation and returns the raw HTML body.
    ///
    /// There is no envelope to decode, so a non-success HTTP status is the
    /// only failure signal and surfaces as [`Error::Transport`].
    pub(crate) fn get_html(&self, operation: &str, params: &[(&str, String)]) -> Result<String> {
        let url = self.url_for(operation)?;
        debug!(operation, "issuing render request");
        let response = self.http.get(url).query(params).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_gains_a_trailing_slash_so_joins_append() {
        let transport = Transport::new(
            "http://example.org/mimir/search",
            reqwest::blocking::Client::new(),
        )
        .expect("valid endpoint");
        let url = transport.url_for("postQuery").expect("joinable path");
        assert_eq!(url.as_str(), "http://example.org/mimir/search/postQuery");
    }

    #[test]
    fn trailing_slash_endpoints_are_untouched() {
        let transport = Transport::new(
            "http://example.org/mimir/search/",
            reqwest::blocking::Client::new(),
        )
        .expect("valid endpoint");
        let url = transport.url_for("close").expect("joinable path");
        assert_eq!(url.as_str(), "http://example.org/mimir/search/close");
    }

    #[test]
    fn unparseable_endpoint_is_rejected_up_front() {
        let error = Transport::new("not a url", reqwest::blocking::Client::new())
            .expect_err("invalid endpoint");
        assert!(matches!(error, Error::Endpoint { .. }));
    }
}
