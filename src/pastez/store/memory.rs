use super::DocumentStore;
use crate::error::{PastezError, Result};
use std::cell::Cell;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    documents: HashMap<String, String>,
    offline: bool,
    failure: Option<String>,
    fetches: Cell<usize>,
    stores: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fetch requests that reached the store.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    /// Number of store requests that reached the store.
    pub fn store_count(&self) -> usize {
        self.stores
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Makes every following save fail with `message`, or restores normal
    /// behaviour with `None`.
    pub fn set_failure(&mut self, message: Option<&str>) {
        self.failure = message.map(str::to_string);
    }

    fn next_key(&self) -> String {
        let mut key = Uuid::new_v4().simple().to_string();
        key.truncate(10);
        key
    }
}

impl DocumentStore for InMemoryStore {
    fn fetch(&self, key: &str) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        if self.offline {
            return Err(PastezError::Network("store is offline".to_string()));
        }
        self.documents
            .get(key)
            .cloned()
            .ok_or_else(|| PastezError::NotFound(key.to_string()))
    }

    fn store(&mut self, text: &str) -> Result<String> {
        self.stores += 1;
        if let Some(message) = &self.failure {
            return Err(PastezError::store(message.clone()));
        }
        let key = self.next_key();
        self.documents.insert(key.clone(), text.to_string());
        Ok(key)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_document(mut self, key: &str, text: &str) -> Self {
            self.store
                .documents
                .insert(key.to_string(), text.to_string());
            self
        }

        pub fn offline(mut self) -> Self {
            self.store.set_offline(true);
            self
        }

        pub fn failing_saves(mut self, message: &str) -> Self {
            self.store.set_failure(Some(message));
            self
        }
    }
}
