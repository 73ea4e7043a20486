//! Markup neutralisation for backend-provided report text.
//!
//! Everything the classifier sees has already passed through [`Sanitized::new`],
//! so any text that ends up inside a block is safe to splice into HTML as-is.

use std::fmt;

/// Report text with `&`, `<`, `>` escaped and line endings normalised to `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized(String);

impl Sanitized {
    pub fn new(raw: &str) -> Self {
        let escaped = escape_html(raw);
        Sanitized(normalize_line_endings(&escaped))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn lines(&self) -> std::str::Lines<'_> {
        self.0.lines()
    }
}

impl fmt::Display for Sanitized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes the three characters that can open markup in element content.
/// `&` goes first so the entities produced for `<` and `>` are not re-escaped.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
