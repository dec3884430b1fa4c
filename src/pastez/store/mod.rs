//! # Storage Layer
//!
//! The remote paste store sits behind the [`DocumentStore`] trait so the
//! session logic can run against different backends.
//!
//! ## Implementations
//!
//! - [`http::HttpStore`]: production client for hastebin-style servers
//!   - `GET /documents/{key}` returns `{"data": "..."}`
//!   - `POST /documents` with a `text/plain` body returns `{"key": "..."}`
//!   - failures carry `{"message": "..."}`, or an unparsable body
//!
//! - [`memory::InMemoryStore`]: in-memory store for testing
//!   - No persistence, counts requests so tests can assert that a rejected
//!     save never reached the store
//!
//! Neither implementation retries. A fetch is an idempotent read; a store is
//! a non-idempotent write and callers must not submit the same document twice.

use crate::error::Result;
use serde::Deserialize;

pub mod http;
pub mod memory;

/// Message shown when a failed save carries no readable reason.
pub const GENERIC_FAILURE: &str = "Something went wrong!";

pub trait DocumentStore {
    /// Fetch the raw text stored under `key`.
    fn fetch(&self, key: &str) -> Result<String>;

    /// Store `text` as a new document and return the key assigned to it.
    fn store(&mut self, text: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct FetchResponse {
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoreResponse {
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct FailureResponse {
    message: String,
}

/// Extracts the reason from a failed save response body.
pub fn failure_message(body: &str) -> String {
    serde_json::from_str::<FailureResponse>(body)
        .map(|f| f.message)
        .unwrap_or_else(|_| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_from_json() {
        assert_eq!(
            failure_message(r#"{"message":"Document exceeds maximum length."}"#),
            "Document exceeds maximum length."
        );
    }

    #[test]
    fn failure_message_falls_back() {
        assert_eq!(failure_message("<html>502 Bad Gateway</html>"), GENERIC_FAILURE);
        assert_eq!(failure_message(""), GENERIC_FAILURE);
        assert_eq!(failure_message(r#"{"error":"nope"}"#), GENERIC_FAILURE);
    }
}
