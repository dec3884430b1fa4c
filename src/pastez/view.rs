//! # View Synchronization
//!
//! Everything a front end displays is derived here from session
//! transitions: the rendered text or editor buffer, the title, navigation
//! history, and the line-number gutter. The view has no state of its own
//! beyond what the last transition produced.
//!
//! Transient notices are the one timed resource. They are timestamped on
//! creation and dropped once their lifetime has passed; nothing runs in the
//! background to remove them.

use crate::language::extension_for_language;
use crate::session::Session;
use std::time::{Duration, Instant};

/// How long a notice stays visible, fade-out included.
pub const NOTICE_LIFETIME: Duration = Duration::from_millis(3200);

/// What caused the view to be refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A fresh document. `record_history` adds a `/` entry.
    Started { record_history: bool },
    /// A document was opened by key.
    Loaded,
    /// A save completed.
    Saved,
    /// Unsaved text changed, or a save began or failed.
    Edited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    Editor { text: String },
    Viewer { markup: String },
}

/// `/{id}` or `/{id}.{ext}`; the suffix is omitted without a language.
pub fn canonical_path(identifier: &str, language: Option<&str>) -> String {
    match language.map(extension_for_language).filter(|ext| !ext.is_empty()) {
        Some(ext) => format!("/{}.{}", identifier, ext),
        None => format!("/{}", identifier),
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    app_name: String,
    title: String,
    location: String,
    surface: Surface,
    gutter: Vec<String>,
    history: Vec<HistoryEntry>,
}

impl ViewState {
    pub fn new(app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        Self {
            title: app_name.clone(),
            app_name,
            location: "/".to_string(),
            surface: Surface::Editor {
                text: String::new(),
            },
            gutter: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn sync(&mut self, session: &Session, transition: Transition) {
        let extension = session
            .identifier()
            .and(session.language())
            .map(extension_for_language)
            .filter(|ext| !ext.is_empty());
        self.title = match extension {
            Some(ext) => format!("{} - {}", self.app_name, ext),
            None => self.app_name.clone(),
        };

        match (session.identifier(), session.markup()) {
            (Some(id), Some(markup)) => {
                self.surface = Surface::Viewer {
                    markup: markup.to_string(),
                };
                self.gutter = (1..=session.line_count()).map(|n| n.to_string()).collect();
                self.location = canonical_path(id, session.language());
            }
            _ => {
                self.surface = Surface::Editor {
                    text: session.content().to_string(),
                };
                self.gutter = Vec::new();
            }
        }

        match transition {
            Transition::Saved => {
                if let Some(id) = session.identifier() {
                    self.history.push(HistoryEntry {
                        label: format!("{}-{}", self.app_name, id),
                        path: self.location.clone(),
                    });
                }
            }
            Transition::Started { record_history } => {
                self.location = "/".to_string();
                if record_history {
                    self.history.push(HistoryEntry {
                        label: self.app_name.clone(),
                        path: "/".to_string(),
                    });
                }
            }
            Transition::Loaded | Transition::Edited => {}
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Path of the page currently shown.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn gutter(&self) -> &[String] {
        &self.gutter
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: MessageLevel,
    pub content: String,
    raised_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTICE_LIFETIME
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notifications {
    notices: Vec<Notice>,
}

impl Notifications {
    pub fn push(&mut self, level: MessageLevel, content: impl Into<String>) {
        self.push_at(level, content, Instant::now());
    }

    pub fn push_at(&mut self, level: MessageLevel, content: impl Into<String>, now: Instant) {
        self.notices.push(Notice {
            level,
            content: content.into(),
            raised_at: now,
        });
    }

    /// Notices still visible at `now`; expired ones are dropped.
    pub fn active(&mut self, now: Instant) -> &[Notice] {
        self.notices.retain(|n| !n.is_expired(now));
        &self.notices
    }

    /// Hands over every pending notice regardless of age.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
