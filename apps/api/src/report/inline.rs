//! Inline formatting: emphasis runs and code spans.
//!
//! Passes run strongest first: `***` then `**` then `*`, and code spans last.
//! A later pass only looks at the plain text left between earlier matches,
//! so a `***x***` run is never re-read as nested single emphasis. Emphasis
//! matches that would cut through a backtick pair are skipped, so
//! `` `src/**/*.rs` `` stays one code span.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::report::document::Span;

fn critical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*\*([^*]+)\*\*\*").unwrap())
}

fn strong_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap())
}

fn emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*([^*\n]+)\*").unwrap())
}

fn code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").unwrap())
}

enum Piece<'a> {
    Plain(&'a str),
    Wrapped(&'a str),
}

/// True when `m` cuts through `code`: they overlap but `m` does not enclose it.
fn splits_code(m: &Range<usize>, code: &Range<usize>) -> bool {
    let overlaps = m.start < code.end && code.start < m.end;
    let encloses = m.start <= code.start && code.end <= m.end;
    overlaps && !encloses
}

/// Splits `text` on matches of `re`, whose group 1 is the wrapped content.
/// Matching is leftmost-first. When `protect_code` is set, a match that cuts
/// through a code span is skipped and the search resumes one byte later.
fn split_on<'a>(re: &Regex, text: &'a str, protect_code: bool) -> Vec<Piece<'a>> {
    let code: Vec<Range<usize>> = if protect_code {
        code_re().find_iter(text).map(|m| m.range()).collect()
    } else {
        Vec::new()
    };

    let mut pieces = Vec::new();
    let mut plain_start = 0;
    let mut search = 0;

    while search < text.len() {
        let Some(caps) = re.captures_at(text, search) else {
            break;
        };
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if code.iter().any(|c| splits_code(&whole.range(), c)) {
            // every pattern opens on an ASCII delimiter, so this is a char boundary
            search = whole.start() + 1;
            continue;
        }
        if whole.start() > plain_start {
            pieces.push(Piece::Plain(&text[plain_start..whole.start()]));
        }
        pieces.push(Piece::Wrapped(inner.as_str()));
        plain_start = whole.end();
        search = plain_start;
    }

    if plain_start < text.len() {
        pieces.push(Piece::Plain(&text[plain_start..]));
    }
    pieces
}

/// Parses one line of sanitized text into inline spans.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    for piece in split_on(critical_re(), text, true) {
        match piece {
            Piece::Wrapped(inner) => spans.push(Span::Critical(code_spans(inner))),
            Piece::Plain(rest) => strong_pass(rest, &mut spans),
        }
    }
    coalesce(spans)
}

fn strong_pass(text: &str, out: &mut Vec<Span>) {
    for piece in split_on(strong_re(), text, true) {
        match piece {
            Piece::Wrapped(inner) => out.push(Span::Strong(code_spans(inner))),
            Piece::Plain(rest) => emphasis_pass(rest, out),
        }
    }
}

fn emphasis_pass(text: &str, out: &mut Vec<Span>) {
    for piece in split_on(emphasis_re(), text, true) {
        match piece {
            Piece::Wrapped(inner) => out.push(Span::Emphasis(code_spans(inner))),
            Piece::Plain(rest) => out.extend(code_spans(rest)),
        }
    }
}

fn code_spans(text: &str) -> Vec<Span> {
    split_on(code_re(), text, false)
        .into_iter()
        .map(|piece| match piece {
            Piece::Wrapped(code) => Span::Code(code.to_string()),
            Piece::Plain(plain) => Span::Text(plain.to_string()),
        })
        .collect()
}

/// Merges adjacent `Text` spans left behind by the pass boundaries.
fn coalesce(spans: Vec<Span>) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match (out.last_mut(), span) {
            (Some(Span::Text(prev)), Span::Text(next)) => prev.push_str(&next),
            (_, span) => out.push(span),
        }
    }
    out
}
