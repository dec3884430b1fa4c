//! Mapping between URL extensions and highlighting languages.
//!
//! The table only needs the *irregular* pairs: a language whose preferred
//! extension is its own name (`go`, `json`, `c`, ...) resolves through the
//! identity fallback in both directions. Reverse lookups return the first
//! matching extension, so the preferred extension of a language must appear
//! before its aliases (`cpp` before `cc`, `bash` before `sh`).

/// Language used for text that should not be highlighted.
pub const PLAIN_TEXT: &str = "plaintext";

const EXTENSION_MAP: &[(&str, &str)] = &[
    ("rb", "ruby"),
    ("py", "python"),
    ("pl", "perl"),
    ("php", "php"),
    ("scala", "scala"),
    ("go", "go"),
    ("xml", "xml"),
    ("html", "xml"),
    ("htm", "xml"),
    ("css", "css"),
    ("js", "javascript"),
    ("vbs", "vbscript"),
    ("lua", "lua"),
    ("pas", "delphi"),
    ("java", "java"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("m", "objectivec"),
    ("vala", "vala"),
    ("sql", "sql"),
    ("sm", "smalltalk"),
    ("lisp", "lisp"),
    ("ini", "ini"),
    ("diff", "diff"),
    ("bash", "bash"),
    ("sh", "bash"),
    ("tex", "tex"),
    ("erl", "erlang"),
    ("hs", "haskell"),
    ("md", "markdown"),
    ("txt", PLAIN_TEXT),
    ("coffee", "coffee"),
    ("swift", "swift"),
    ("rs", "rust"),
];

/// Language for a URL extension, or the extension itself when unmapped.
pub fn language_for_extension(ext: &str) -> &str {
    EXTENSION_MAP
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| *lang)
        .unwrap_or(ext)
}

/// Preferred URL extension for a language, or the language itself when unmapped.
pub fn extension_for_language(language: &str) -> &str {
    EXTENSION_MAP
        .iter()
        .find(|(_, lang)| *lang == language)
        .map(|(ext, _)| *ext)
        .unwrap_or(language)
}

/// Splits a document path such as `abc123.py` into the store key and the
/// extension. Only the first suffix counts: `a.b.c` yields `("a", Some("b"))`.
pub fn split_key(path: &str) -> (&str, Option<&str>) {
    let path = path.trim_start_matches('/');
    let mut parts = path.splitn(3, '.');
    let key = parts.next().unwrap_or_default();
    let ext = parts.next().filter(|ext| !ext.is_empty());
    (key, ext)
}
