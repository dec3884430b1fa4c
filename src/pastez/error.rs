use thiserror::Error;

/// Why a session refused a transition. These are not failures of the
/// system, only commands that do not apply to the current document.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("document is already saved")]
    Locked,

    #[error("a save is already in progress")]
    SaveInFlight,

    #[error("document is blank")]
    Blank,

    #[error("document is not saved yet")]
    NotLocked,
}

#[derive(Error, Debug)]
pub enum PastezError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Store { message: String },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Highlighting failed: {0}")]
    Highlight(String),

    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl PastezError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PastezError>;
