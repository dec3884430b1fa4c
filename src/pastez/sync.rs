//! # Sync Client
//!
//! Performs the two network operations and renders their results. Each call
//! talks to the store exactly once; there is no retry and no caching.

use crate::error::Result;
use crate::highlight::{self, Highlighter};
use crate::store::DocumentStore;

/// A document as confirmed by the store, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedDocument {
    pub key: String,
    pub text: String,
    pub markup: String,
    pub language: Option<String>,
    pub line_count: usize,
}

/// Number of `\n`-separated segments, counting a trailing empty one.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

pub struct SyncClient<S: DocumentStore, H: Highlighter> {
    store: S,
    highlighter: H,
}

impl<S: DocumentStore, H: Highlighter> SyncClient<S, H> {
    pub fn new(store: S, highlighter: H) -> Self {
        Self { store, highlighter }
    }

    /// Loads `key`, highlighting it as `language_hint` when that works and
    /// by detection otherwise. When detection finds nothing the hint still
    /// names the document's language.
    pub fn fetch_document(&self, key: &str, language_hint: Option<&str>) -> Result<SyncedDocument> {
        let text = self.store.fetch(key)?;
        let highlighted = highlight::highlight_with_fallback(&self.highlighter, language_hint, &text);
        let language = highlighted
            .language
            .or_else(|| language_hint.map(str::to_string));

        log::info!("loaded {} ({:?})", key, language);
        Ok(SyncedDocument {
            key: key.to_string(),
            line_count: line_count(&text),
            markup: highlighted.markup,
            language,
            text,
        })
    }

    /// Stores `text` verbatim. The rendering always comes from detection.
    pub fn store_document(&mut self, text: &str) -> Result<SyncedDocument> {
        let key = self.store.store(text)?;
        let highlighted = highlight::fallback(&self.highlighter, text);

        log::info!("saved {} ({:?})", key, highlighted.language);
        Ok(SyncedDocument {
            key,
            text: text.to_string(),
            markup: highlighted.markup,
            language: highlighted.language,
            line_count: line_count(text),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }
}
