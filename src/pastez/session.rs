//! # Document Session
//!
//! A [`Session`] is an immutable value describing the one document the
//! client is showing. Every transition builds a new value; the previous one
//! is simply dropped by whoever held it.
//!
//! ```text
//!   New ──edit──▶ Editing ──begin_save──▶ Saving ──lock──▶ Locked
//!                    ▲                       │
//!                    └────────revert─────────┘
//! ```
//!
//! `Locked` is terminal. Duplicating a locked session produces a fresh
//! `Editing` value; nothing ever returns to `Unsaved` in place.
//!
//! The identifier and the `Saved` lock state share a single source: only
//! [`Session::locked`] sets an identifier, and only a document confirmed by
//! the store (a fetch or a save response) can be passed to it.

use crate::error::{Rejection, Result};
use crate::highlight::Highlighter;
use crate::store::DocumentStore;
use crate::sync::{SyncClient, SyncedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unsaved,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    New,
    Editing,
    Saving,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
    identifier: Option<String>,
    content: String,
    language: Option<String>,
    markup: Option<String>,
    line_count: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty, never-saved document.
    pub fn new() -> Self {
        Self {
            phase: Phase::New,
            identifier: None,
            content: String::new(),
            language: None,
            markup: None,
            line_count: 0,
        }
    }

    /// An unsaved document holding `content`. Empty content is a `New` session.
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let phase = if content.is_empty() {
            Phase::New
        } else {
            Phase::Editing
        };
        Self {
            phase,
            content,
            ..Self::new()
        }
    }

    /// A saved document as confirmed by the store.
    pub fn locked(doc: SyncedDocument) -> Self {
        Self {
            phase: Phase::Locked,
            identifier: Some(doc.key),
            content: doc.text,
            language: doc.language,
            markup: Some(doc.markup),
            line_count: doc.line_count,
        }
    }

    /// Loads `key` from the store. Any error means the caller should start a
    /// new document instead.
    pub fn load<S: DocumentStore, H: Highlighter>(
        sync: &SyncClient<S, H>,
        key: &str,
        language_hint: Option<&str>,
    ) -> Result<Self> {
        sync.fetch_document(key, language_hint).map(Self::locked)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lock_state(&self) -> LockState {
        match self.phase {
            Phase::Locked => LockState::Saved,
            _ => LockState::Unsaved,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_state() == LockState::Saved
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// True when the content has something other than whitespace.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    fn writable(&self) -> std::result::Result<(), Rejection> {
        match self.phase {
            Phase::Locked => Err(Rejection::Locked),
            Phase::Saving => Err(Rejection::SaveInFlight),
            Phase::New | Phase::Editing => Ok(()),
        }
    }

    /// Replaces the text of an unsaved document.
    pub fn edit(&self, content: impl Into<String>) -> std::result::Result<Self, Rejection> {
        self.writable()?;
        Ok(Self::with_content(content))
    }

    /// Marks the document as being saved. A second call before the save
    /// completes is rejected just like a call on a locked document.
    pub fn begin_save(&self) -> std::result::Result<Self, Rejection> {
        self.writable()?;
        if !self.has_content() {
            return Err(Rejection::Blank);
        }
        Ok(Self {
            phase: Phase::Saving,
            ..self.clone()
        })
    }

    /// Completes a save with the store's confirmation.
    pub fn lock(&self, doc: SyncedDocument) -> Self {
        debug_assert_eq!(self.phase, Phase::Saving);
        Self::locked(doc)
    }

    /// Abandons a failed save, keeping the text for another attempt.
    pub fn revert(&self) -> Self {
        match self.phase {
            Phase::Saving => Self::with_content(self.content.clone()),
            _ => self.clone(),
        }
    }

    /// Saves the document in one step. On any error `self` is still the
    /// session to keep, with its content intact.
    pub fn save<S: DocumentStore, H: Highlighter>(&self, sync: &mut SyncClient<S, H>) -> Result<Self> {
        let saving = self.begin_save()?;
        let doc = sync.store_document(saving.content())?;
        Ok(saving.lock(doc))
    }

    /// Starts an editable copy of a locked document. The copy has no
    /// identifier until it is saved itself, and is `Editing` even when the
    /// original is empty.
    pub fn duplicate(&self) -> std::result::Result<Self, Rejection> {
        if !self.is_locked() {
            return Err(Rejection::NotLocked);
        }
        Ok(Self {
            phase: Phase::Editing,
            content: self.content.clone(),
            ..Self::new()
        })
    }
}
