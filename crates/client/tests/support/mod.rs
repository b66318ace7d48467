//! Canned-response HTTP server for exercising the blocking client.
//!
//! Binds an ephemeral port, answers one request per connection from a
//! background thread, and records every request target so tests can assert
//! on which operations were issued, with which parameters, in which order.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// What the fixture server answers for one request.
pub enum FixtureResponse {
    /// 200 with an XML body.
    Xml(String),
    /// 200 with an HTML body.
    Html(String),
    /// 404 with a plain-text body.
    NotFound,
}

pub struct FixtureServer {
    endpoint: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    /// Starts the server with a handler from request target (path + query
    /// string) to canned response.
    pub fn start<H>(handler: H) -> Self
    where
        H: Fn(&str) -> FixtureResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let endpoint = format!("http://{}/", listener.local_addr().expect("local addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve(stream, &handler, &seen);
            }
        });

        Self { endpoint, requests }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Every request target received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// The targets of all requests for one operation path.
    pub fn requests_for(&self, operation: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|target| operation_of(target) == operation)
            .collect()
    }
}

fn serve<H>(mut stream: TcpStream, handler: &H, seen: &Mutex<Vec<String>>)
where
    H: Fn(&str) -> FixtureResponse,
{
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // "GET /path?query HTTP/1.1"
    let Some(target) = request_line.split_whitespace().nth(1).map(str::to_owned) else {
        return;
    };
    // Drain headers; the client sends no body on GET.
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(_) if line == "\r\n" || line.is_empty() => break,
            Ok(_) => {}
            Err(_) => return,
        }
    }

    seen.lock().expect("requests lock").push(target.clone());

    let (status, content_type, body) = match handler(&target) {
        FixtureResponse::Xml(body) => ("200 OK", "application/xml", body),
        FixtureResponse::Html(body) => ("200 OK", "text/html", body),
        FixtureResponse::NotFound => ("404 Not Found", "text/plain", "not found".to_owned()),
    };
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    let _ = stream.write_all(response.as_bytes());
}

/// The operation path of a request target, without the leading slash or
/// query string.
pub fn operation_of(target: &str) -> &str {
    let path = target.split('?').next().unwrap_or(target);
    path.trim_start_matches('/')
}

/// Whether the request target carries the named query parameter.
pub fn has_param(target: &str, name: &str) -> bool {
    param(target, name).is_some()
}

/// The raw (still percent-encoded) value of the named query parameter.
pub fn param(target: &str, name: &str) -> Option<String> {
    let query = target.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// Wraps a payload in a success envelope.
pub fn success(payload: &str) -> FixtureResponse {
    FixtureResponse::Xml(format!(
        r#"<message xmlns="http://gate.ac.uk/ns/mimir"><state>SUCCESS</state><data>{payload}</data></message>"#,
    ))
}

/// Wraps a diagnostic in an error envelope.
pub fn backend_error(message: &str) -> FixtureResponse {
    FixtureResponse::Xml(format!(
        r#"<message xmlns="http://gate.ac.uk/ns/mimir"><state>ERROR</state><error>{message}</error></message>"#,
    ))
}
