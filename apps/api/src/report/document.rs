//! Typed intermediate form of a rendered analysis report.

use serde::Serialize;

/// Inline run inside a block. All text is already markup-safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Code(String),
    /// `***x***`
    Critical(Vec<Span>),
    /// `**x**`
    Strong(Vec<Span>),
    /// `*x*`
    Emphasis(Vec<Span>),
    LineBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleKind {
    /// `❌ BEFORE:`
    Before,
    /// `✅ AFTER:`
    After,
    /// `💡 WHY:`
    Why,
}

impl ExampleKind {
    pub fn label(self) -> &'static str {
        match self {
            ExampleKind::Before => "❌ BEFORE:",
            ExampleKind::After => "✅ AFTER:",
            ExampleKind::Why => "💡 WHY:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Ordered,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub kind: ListKind,
    pub text: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, text: Vec<Span> },
    Paragraph { text: Vec<Span> },
    List { items: Vec<ListItem> },
    ExampleBlock { kind: ExampleKind, text: Vec<Span> },
    Blockquote { text: Vec<Span> },
    /// Fixed notice emitted instead of any content when the report is missing or too short.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    pub fn unavailable() -> Self {
        RenderedDocument {
            blocks: vec![Block::Unavailable],
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.blocks.as_slice(), [Block::Unavailable])
    }
}

/// Concatenated text content of a span run, markers dropped.
#[cfg(test)]
pub fn plain_text(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(t) | Span::Code(t) => out.push_str(t),
            Span::Critical(inner) | Span::Strong(inner) | Span::Emphasis(inner) => {
                out.push_str(&plain_text(inner))
            }
            Span::LineBreak => out.push('\n'),
        }
    }
    out
}
