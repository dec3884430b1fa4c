use super::{failure_message, DocumentStore, FetchResponse, StoreResponse, GENERIC_FAILURE};
use crate::error::{PastezError, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

/// Client for a hastebin-compatible server.
///
/// Requests carry no timeout and are never retried: a failure is reported
/// once and the caller decides what to do with it.
pub struct HttpStore {
    base_url: String,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pastez/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| PastezError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn documents_url(&self) -> String {
        format!("{}/documents", self.base_url)
    }

    fn document_url(&self, key: &str) -> String {
        format!("{}/documents/{}", self.base_url, urlencoding::encode(key))
    }
}

impl DocumentStore for HttpStore {
    fn fetch(&self, key: &str) -> Result<String> {
        let url = self.document_url(key);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| PastezError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(PastezError::NotFound(key.to_string())),
            status if !status.is_success() => {
                return Err(PastezError::Network(format!("status {}", status)))
            }
            _ => {}
        }

        let body: FetchResponse = response
            .json()
            .map_err(|e| PastezError::Network(format!("invalid response: {}", e)))?;
        Ok(body.data)
    }

    fn store(&mut self, text: &str) -> Result<String> {
        let url = self.documents_url();
        log::debug!("POST {} ({} bytes)", url, text.len());

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(text.to_string())
            .send()
            .map_err(|e| {
                log::warn!("save request failed: {}", e);
                PastezError::store(GENERIC_FAILURE)
            })?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            log::warn!("save rejected with status {}", status);
            return Err(PastezError::store(failure_message(&body)));
        }

        serde_json::from_str::<StoreResponse>(&body)
            .map(|r| r.key)
            .map_err(|e| {
                log::warn!("unreadable save response: {}", e);
                PastezError::store(GENERIC_FAILURE)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    /// Serves one canned response on a local port and hands back the raw
    /// request it received.
    fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let _ = stream.write_all(response.as_bytes());
            request
        });
        (base, handle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn fetch_reads_the_data_field() {
        let (base, server) = serve_once("200 OK", r#"{"data":"hi\nthere"}"#);
        let store = HttpStore::new(&base).unwrap();

        assert_eq!(store.fetch("abc").unwrap(), "hi\nthere");
        let request = server.join().unwrap();
        assert!(request.starts_with("GET /documents/abc HTTP/1.1\r\n"), "{}", request);
    }

    #[test]
    fn fetch_maps_404_to_not_found() {
        let (base, server) = serve_once("404 Not Found", r#"{"message":"Document not found."}"#);
        let store = HttpStore::new(&base).unwrap();

        match store.fetch("nope") {
            Err(PastezError::NotFound(key)) => assert_eq!(key, "nope"),
            other => panic!("unexpected: {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn fetch_maps_other_failures_to_network() {
        let (base, server) = serve_once("500 Internal Server Error", "oops");
        let store = HttpStore::new(&base).unwrap();

        assert!(matches!(store.fetch("abc"), Err(PastezError::Network(_))));
        server.join().unwrap();
    }

    #[test]
    fn store_posts_plain_text_and_reads_the_key() {
        let (base, server) = serve_once("200 OK", r#"{"key":"xyz"}"#);
        let mut store = HttpStore::new(&base).unwrap();

        assert_eq!(store.store("body text\n  kept as is").unwrap(), "xyz");
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /documents HTTP/1.1\r\n"), "{}", request);
        assert!(
            request
                .to_lowercase()
                .contains("content-type: text/plain; charset=utf-8\r\n"),
            "{}",
            request
        );
        assert!(request.ends_with("\r\n\r\nbody text\n  kept as is"), "{}", request);
    }

    #[test]
    fn store_failure_carries_the_server_message() {
        let (base, server) = serve_once(
            "400 Bad Request",
            r#"{"message":"Document exceeds maximum length."}"#,
        );
        let mut store = HttpStore::new(&base).unwrap();

        match store.store("too long") {
            Err(PastezError::Store { message }) => {
                assert_eq!(message, "Document exceeds maximum length.")
            }
            other => panic!("unexpected: {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn store_failure_without_message_is_generic() {
        let (base, server) = serve_once("502 Bad Gateway", "<html>bad gateway</html>");
        let mut store = HttpStore::new(&base).unwrap();

        match store.store("x") {
            Err(PastezError::Store { message }) => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("unexpected: {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn unreadable_save_response_is_generic() {
        let (base, server) = serve_once("200 OK", r#"{"id":"xyz"}"#);
        let mut store = HttpStore::new(&base).unwrap();

        match store.store("x") {
            Err(PastezError::Store { message }) => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("unexpected: {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn urls_are_built_from_the_base() {
        let store = HttpStore::new("http://paste.example/").unwrap();
        assert_eq!(store.base_url(), "http://paste.example");
        assert_eq!(store.documents_url(), "http://paste.example/documents");
        assert_eq!(
            store.document_url("abc123"),
            "http://paste.example/documents/abc123"
        );
    }

    #[test]
    fn unreachable_server_is_a_network_error() {
        let store = HttpStore::new("http://127.0.0.1:1").unwrap();
        assert!(matches!(store.fetch("abc"), Err(PastezError::Network(_))));
    }

    #[test]
    fn unreachable_server_fails_a_save_generically() {
        let mut store = HttpStore::new("http://127.0.0.1:1").unwrap();
        match store.store("hello") {
            Err(PastezError::Store { message }) => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
