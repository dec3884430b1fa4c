//! # Highlighting
//!
//! The highlighter is an external collaborator: the rest of the crate only
//! sees the [`Highlighter`] trait. Production code uses
//! [`treesitter::TreeSitterHighlighter`].
//!
//! The fallback policy lives here rather than in the implementations. A
//! requested language is tried first ([`attempt`]); if that fails for any
//! reason, or no language was requested, automatic detection runs
//! ([`fallback`]). Detection cannot fail, so [`highlight_with_fallback`]
//! never returns an error.

use crate::error::Result;
use crate::language::PLAIN_TEXT;

pub mod treesitter;

/// Rendered text plus the language the renderer settled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub markup: String,
    pub language: Option<String>,
}

impl Highlighted {
    pub fn plain(text: &str) -> Self {
        Self {
            markup: text.to_string(),
            language: None,
        }
    }
}

pub trait Highlighter {
    /// Highlight `text` as `language`. Fails for unknown languages.
    fn highlight(&self, language: &str, text: &str) -> Result<Highlighted>;

    /// Detect the language of `text`. `language` is `None` when nothing fits.
    fn highlight_auto(&self, text: &str) -> Highlighted;
}

/// First step: render in the requested language.
pub fn attempt<H: Highlighter + ?Sized>(
    highlighter: &H,
    language: &str,
    text: &str,
) -> Result<Highlighted> {
    if language == PLAIN_TEXT {
        return Ok(Highlighted {
            markup: text.to_string(),
            language: Some(PLAIN_TEXT.to_string()),
        });
    }
    highlighter.highlight(language, text)
}

/// Second step: automatic detection.
pub fn fallback<H: Highlighter + ?Sized>(highlighter: &H, text: &str) -> Highlighted {
    highlighter.highlight_auto(text)
}

pub fn highlight_with_fallback<H: Highlighter + ?Sized>(
    highlighter: &H,
    hint: Option<&str>,
    text: &str,
) -> Highlighted {
    let Some(language) = hint else {
        return fallback(highlighter, text);
    };

    match attempt(highlighter, language, text) {
        Ok(highlighted) => highlighted,
        Err(e) => {
            log::debug!("highlighting as {} failed ({}), detecting instead", language, e);
            fallback(highlighter, text)
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::PastezError;
    use std::cell::RefCell;

    /// Wraps text in `<lang>` markers so tests can see which path rendered it.
    #[derive(Default)]
    pub struct StubHighlighter {
        pub known: Vec<String>,
        pub detects: Option<String>,
        pub requested: RefCell<Vec<String>>,
    }

    impl StubHighlighter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn knowing(mut self, language: &str) -> Self {
            self.known.push(language.to_string());
            self
        }

        pub fn detecting(mut self, language: &str) -> Self {
            self.detects = Some(language.to_string());
            self
        }
    }

    impl Highlighter for StubHighlighter {
        fn highlight(&self, language: &str, text: &str) -> Result<Highlighted> {
            self.requested.borrow_mut().push(language.to_string());
            if !self.known.iter().any(|l| l == language) {
                return Err(PastezError::UnsupportedLanguage(language.to_string()));
            }
            Ok(Highlighted {
                markup: format!("<{}>{}", language, text),
                language: Some(language.to_string()),
            })
        }

        fn highlight_auto(&self, text: &str) -> Highlighted {
            match &self.detects {
                Some(language) => Highlighted {
                    markup: format!("<auto:{}>{}", language, text),
                    language: Some(language.clone()),
                },
                None => Highlighted::plain(text),
            }
        }
    }
}
