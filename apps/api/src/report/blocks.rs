//! Line classifier: turns sanitized report text into typed blocks.
//!
//! Rules, highest precedence first:
//! 1. `####` / `###` / `##` headings (longest prefix wins)
//! 2. `❌ BEFORE:` / `✅ AFTER:` / `💡 WHY:` example-block markers
//! 3. ordered (`1. x`) and bullet (`- x`, `• x`, ...) list items
//! 4. `&gt; x` blockquotes
//! 5. everything else is a paragraph
//!
//! Inline formatting (emphasis, code) is applied to the text of every block.

use tracing::debug;

use crate::report::document::{Block, ExampleKind, ListItem, ListKind, RenderedDocument, Span};
use crate::report::inline::parse_inline;
use crate::report::sanitize::Sanitized;

/// Reports shorter than this (in UTF-16 code units) render as the unavailable notice.
pub const MIN_REPORT_LEN: usize = 50;

const BULLET_GLYPHS: &[char] = &['-', '•', '▪', '▫', '○', '●'];
const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Renders a raw analysis report. Never fails: missing or short input yields
/// the unavailable notice, malformed markup degrades to paragraphs.
pub fn render(text: Option<&str>) -> RenderedDocument {
    let Some(text) = text else {
        debug!("No analysis text supplied; rendering unavailable notice");
        return RenderedDocument::unavailable();
    };
    let units = text.encode_utf16().count();
    if units < MIN_REPORT_LEN {
        debug!("Analysis text too short ({units} UTF-16 units); rendering unavailable notice");
        return RenderedDocument::unavailable();
    }

    let blocks = classify(&Sanitized::new(text));
    debug!("Rendered analysis into {} blocks", blocks.len());
    RenderedDocument { blocks }
}

/// Classifies sanitized text line by line.
pub fn classify(text: &Sanitized) -> Vec<Block> {
    let mut builder = Builder::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            // blank lines end example blocks but never split a list run
            builder.close_example();
            continue;
        }

        if let Some((level, rest)) = heading(line) {
            builder.flush();
            builder.blocks.push(Block::Heading {
                level,
                text: parse_inline(rest),
            });
        } else if let Some((kind, rest)) = example_marker(line) {
            builder.flush();
            builder.example = Some((kind, parse_inline(rest)));
        } else if let Some((kind, rest)) = list_item(line) {
            builder.close_example();
            builder.list.push(ListItem {
                kind,
                text: parse_inline(rest),
            });
        } else if let Some(rest) = blockquote(line) {
            builder.flush();
            builder.blocks.push(Block::Blockquote {
                text: parse_inline(rest),
            });
        } else if let Some((_, body)) = builder.example.as_mut() {
            if !body.is_empty() {
                body.push(Span::LineBreak);
            }
            body.extend(parse_inline(line));
        } else {
            builder.flush();
            builder.blocks.push(Block::Paragraph {
                text: parse_inline(line),
            });
        }
    }

    builder.finish()
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    list: Vec<ListItem>,
    example: Option<(ExampleKind, Vec<Span>)>,
}

impl Builder {
    fn close_example(&mut self) {
        if let Some((kind, text)) = self.example.take() {
            self.blocks.push(Block::ExampleBlock { kind, text });
        }
    }

    fn close_list(&mut self) {
        if !self.list.is_empty() {
            let items = std::mem::take(&mut self.list);
            self.blocks.push(Block::List { items });
        }
    }

    /// Closes whichever container is open. At most one is open at a time.
    fn flush(&mut self) {
        self.close_example();
        self.close_list();
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
            .into_iter()
            .filter(|block| !matches!(block, Block::Paragraph { text } if is_blank(text)))
            .collect()
    }
}

fn is_blank(spans: &[Span]) -> bool {
    spans
        .iter()
        .all(|span| matches!(span, Span::Text(t) if t.trim().is_empty()))
}

fn heading(line: &str) -> Option<(u8, &str)> {
    [("####", 4), ("###", 3), ("##", 2)]
        .into_iter()
        .find_map(|(marker, level)| {
            let rest = line.strip_prefix(marker)?;
            rest.starts_with(char::is_whitespace)
                .then(|| (level, rest.trim_start()))
        })
}

fn example_marker(line: &str) -> Option<(ExampleKind, &str)> {
    let mut chars = line.chars();
    let kind = match chars.next()? {
        '❌' => ExampleKind::Before,
        '✅' => ExampleKind::After,
        '💡' => ExampleKind::Why,
        _ => return None,
    };
    let keyword = match kind {
        ExampleKind::Before => "BEFORE:",
        ExampleKind::After => "AFTER:",
        ExampleKind::Why => "WHY:",
    };

    let rest = chars
        .as_str()
        .trim_start_matches(VARIATION_SELECTOR)
        .trim_start();
    let head = rest.get(..keyword.len())?;
    head.eq_ignore_ascii_case(keyword)
        .then(|| (kind, rest[keyword.len()..].trim_start()))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = line[digits..].strip_prefix('.')?;
        return item_body(rest).map(|body| (ListKind::Ordered, body));
    }

    let mut chars = line.chars();
    let glyph = chars.next()?;
    if !BULLET_GLYPHS.contains(&glyph) {
        return None;
    }
    item_body(chars.as_str()).map(|body| (ListKind::Bullet, body))
}

/// Requires at least one whitespace character followed by non-empty text.
fn item_body(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let body = rest.trim_start();
    (!body.is_empty()).then_some(body)
}

fn blockquote(line: &str) -> Option<&str> {
    let body = line.strip_prefix("&gt;")?.trim_start();
    (!body.is_empty()).then_some(body)
}
