//! Tree-sitter backed highlighter.
//!
//! Classification is grammar-agnostic: node kinds are matched by name
//! (comments, strings, numbers, types) and anonymous alphabetic tokens are
//! treated as keywords. Automatic detection parses the text with every
//! bundled grammar, discards grammars that report syntax errors, and keeps
//! the one with the most keywords.

use super::{Highlighted, Highlighter};
use crate::error::{PastezError, Result};
use console::Style;
use tree_sitter::{Language, Node, Parser, Tree};

struct Grammar {
    name: &'static str,
    language: fn() -> Language,
}

const GRAMMARS: &[Grammar] = &[
    Grammar {
        name: "rust",
        language: tree_sitter_rust::language,
    },
    Grammar {
        name: "python",
        language: tree_sitter_python::language,
    },
    Grammar {
        name: "javascript",
        language: tree_sitter_javascript::language,
    },
    Grammar {
        name: "go",
        language: tree_sitter_go::language,
    },
    Grammar {
        name: "c",
        language: tree_sitter_c::language,
    },
    Grammar {
        name: "cpp",
        language: tree_sitter_cpp::language,
    },
    Grammar {
        name: "java",
        language: tree_sitter_java::language,
    },
    Grammar {
        name: "json",
        language: tree_sitter_json::language,
    },
    Grammar {
        name: "bash",
        language: tree_sitter_bash::language,
    },
    Grammar {
        name: "css",
        language: tree_sitter_css::language,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Comment,
    String,
    Number,
    Constant,
    Type,
    Keyword,
}

impl HighlightKind {
    fn style(self) -> Style {
        match self {
            HighlightKind::Comment => Style::new().color256(245).italic(),
            HighlightKind::String => Style::new().green(),
            HighlightKind::Number => Style::new().magenta(),
            HighlightKind::Constant => Style::new().magenta().bold(),
            HighlightKind::Type => Style::new().cyan(),
            HighlightKind::Keyword => Style::new().blue().bold(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    kind: HighlightKind,
}

/// Renders ANSI-styled markup. With `styled` off, markup equals the input
/// text, which is what non-terminal output wants.
pub struct TreeSitterHighlighter {
    styled: bool,
}

impl Default for TreeSitterHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TreeSitterHighlighter {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    pub fn languages() -> impl Iterator<Item = &'static str> {
        GRAMMARS.iter().map(|g| g.name)
    }

    fn render(&self, text: &str, spans: &[Span]) -> String {
        if !self.styled {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + spans.len() * 8);
        let mut cursor = 0;
        for span in spans {
            if span.start < cursor {
                continue;
            }
            let (Some(before), Some(token)) =
                (text.get(cursor..span.start), text.get(span.start..span.end))
            else {
                continue;
            };
            out.push_str(before);
            paint(&mut out, span.kind.style(), token);
            cursor = span.end;
        }
        out.push_str(text.get(cursor..).unwrap_or_default());
        out
    }
}

impl Highlighter for TreeSitterHighlighter {
    fn highlight(&self, language: &str, text: &str) -> Result<Highlighted> {
        let grammar = GRAMMARS
            .iter()
            .find(|g| g.name == language)
            .ok_or_else(|| PastezError::UnsupportedLanguage(language.to_string()))?;
        let tree = parse(grammar, text)?;
        let spans = collect_spans(&tree);

        Ok(Highlighted {
            markup: self.render(text, &spans),
            language: Some(grammar.name.to_string()),
        })
    }

    fn highlight_auto(&self, text: &str) -> Highlighted {
        let mut best: Option<(&Grammar, Vec<Span>, usize)> = None;

        for grammar in GRAMMARS {
            let Ok(tree) = parse(grammar, text) else {
                continue;
            };
            if tree.root_node().has_error() {
                continue;
            }
            let spans = collect_spans(&tree);
            let relevance = spans
                .iter()
                .filter(|s| s.kind == HighlightKind::Keyword)
                .count();
            if relevance > best.as_ref().map_or(0, |(_, _, r)| *r) {
                best = Some((grammar, spans, relevance));
            }
        }

        match best {
            Some((grammar, spans, relevance)) => {
                log::debug!("detected {} (relevance {})", grammar.name, relevance);
                Highlighted {
                    markup: self.render(text, &spans),
                    language: Some(grammar.name.to_string()),
                }
            }
            None => Highlighted::plain(text),
        }
    }
}

fn parse(grammar: &Grammar, text: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language((grammar.language)())
        .map_err(|e| PastezError::Highlight(format!("{}: {}", grammar.name, e)))?;
    parser
        .parse(text, None)
        .ok_or_else(|| PastezError::Highlight(format!("{}: parse aborted", grammar.name)))
}

fn collect_spans(tree: &Tree) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut stack = vec![tree.root_node()];

    while let Some(node) = stack.pop() {
        if let Some(kind) = classify(node) {
            if node.start_byte() < node.end_byte() {
                spans.push(Span {
                    start: node.start_byte(),
                    end: node.end_byte(),
                    kind,
                });
            }
            continue;
        }
        // Reverse push keeps document order when popping.
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }

    spans.sort_by_key(|s| (s.start, s.end));
    spans
}

fn classify(node: Node<'_>) -> Option<HighlightKind> {
    let kind = node.kind();
    if kind.contains("comment") {
        return Some(HighlightKind::Comment);
    }
    if kind.contains("string") || matches!(kind, "char_literal" | "heredoc_body") {
        return Some(HighlightKind::String);
    }
    if kind.contains("number") || kind.contains("integer") || kind.contains("float") {
        return Some(HighlightKind::Number);
    }
    if matches!(
        kind,
        "true" | "false" | "null" | "nil" | "none" | "None" | "True" | "False"
    ) {
        return Some(HighlightKind::Constant);
    }
    if kind.ends_with("type_identifier") || kind == "primitive_type" {
        return Some(HighlightKind::Type);
    }
    if !node.is_named() && kind.len() > 1 && kind.chars().all(|c| c.is_ascii_lowercase() || c == '_')
    {
        return Some(HighlightKind::Keyword);
    }
    None
}

/// Styles each line separately so a line gutter never sees a style that
/// spans a newline.
fn paint(out: &mut String, style: Style, token: &str) {
    let style = style.force_styling(true);
    for (i, line) in token.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if !line.is_empty() {
            out.push_str(&style.apply_to(line).to_string());
        }
    }
}
