//! HTML presentation of rendered reports and extracted actions.
//!
//! Class names are the Tailwind vocabulary the front-end stylesheet ships with.

use crate::report::actions::{ActionCategory, ActionSection, ExtractedActions, PriorityAction};
use crate::report::document::{Block, ExampleKind, ListKind, RenderedDocument, Span};
use crate::report::inline::parse_inline;
use crate::report::sanitize::escape_html;

const UNAVAILABLE_HTML: &str = r#"<div class="bg-red-500/10 border border-red-500/30 rounded-lg p-6 text-center">
    <p class="text-red-400 text-lg mb-2">⚠️ Analysis Not Available</p>
    <p class="text-gray-400">The detailed analysis could not be generated.</p>
    <p class="text-sm text-gray-500 mt-2">Check backend logs for details.</p>
</div>"#;

const NO_ACTIONS_HTML: &str = r#"<div class="text-center py-12">
    <p class="text-gray-400 text-lg mb-4">
        📝 Detailed improvements are available in the <strong class="text-white">Detailed Analysis</strong> tab.
    </p>
    <p class="text-gray-500">
        Look for sections marked with 🚀 TOP PRIORITY ACTIONS and ⚠️ AREAS FOR IMPROVEMENT.
    </p>
</div>"#;

const PRO_TIP_HTML: &str = r#"<div class="mt-8 p-5 bg-blue-500/10 border border-blue-500/30 rounded-lg">
    <p class="text-sm text-gray-300 flex items-start gap-2">
        <span class="text-xl">💡</span>
        <span><strong>Pro Tip:</strong> Implement these changes in order of priority for maximum impact on your ATS score. Start with #1 and work your way down.</span>
    </p>
</div>"#;

/// Renders a document into the fragment injected into the "Detailed Analysis" tab.
pub fn render_html(doc: &RenderedDocument) -> String {
    if doc.is_unavailable() {
        return UNAVAILABLE_HTML.to_string();
    }

    let body = doc
        .blocks
        .iter()
        .map(block_html)
        .collect::<Vec<_>>()
        .join("\n");
    format!(r#"<div class="prose-content space-y-4">{body}</div>"#)
}

fn block_html(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            let class = match level {
                4 => "text-lg font-semibold text-purple-200 mt-4 mb-2",
                3 => "text-xl font-bold text-purple-300 mt-6 mb-3",
                _ => "text-2xl font-bold text-white mt-8 mb-4 pb-2 border-b-2 border-purple-500/30",
            };
            format!(r#"<h{level} class="{class}">{}</h{level}>"#, spans_html(text))
        }
        Block::Paragraph { text } => format!(
            r#"<p class="text-gray-300 leading-relaxed mb-3">{}</p>"#,
            spans_html(text)
        ),
        Block::List { items } => {
            let items: String = items
                .iter()
                .map(|item| {
                    let spacing = match item.kind {
                        ListKind::Ordered => "mb-3",
                        ListKind::Bullet => "mb-2",
                    };
                    format!(
                        r#"<li class="ml-6 {spacing} pl-2 text-gray-300 list-item">{}</li>"#,
                        spans_html(&item.text)
                    )
                })
                .collect();
            format!(r#"<ul class="list-disc list-inside space-y-2 my-4 pl-4">{items}</ul>"#)
        }
        Block::ExampleBlock { kind, text } => {
            let (frame, label) = match kind {
                ExampleKind::Before => ("bg-red-500/10 border-l-4 border-red-500", "text-red-400"),
                ExampleKind::After => ("bg-green-500/10 border-l-4 border-green-500", "text-green-400"),
                ExampleKind::Why => ("bg-blue-500/10 border-l-4 border-blue-500", "text-blue-400"),
            };
            format!(
                r#"<div class="example-block {frame} pl-4 py-3 my-4 rounded-r"><span class="{label} font-bold text-lg">{}</span> {}</div>"#,
                kind.label(),
                spans_html(text)
            )
        }
        Block::Blockquote { text } => format!(
            r#"<blockquote class="border-l-4 border-purple-500 pl-4 italic text-gray-400 my-3">{}</blockquote>"#,
            spans_html(text)
        ),
        Block::Unavailable => UNAVAILABLE_HTML.to_string(),
    }
}

/// Span text is already escaped, so it is written verbatim.
pub fn spans_html(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(t) => out.push_str(t),
            Span::Code(c) => {
                out.push_str(r#"<code class="bg-purple-500/20 px-2 py-1 rounded text-purple-200 text-sm font-mono">"#);
                out.push_str(c);
                out.push_str("</code>");
            }
            Span::Critical(inner) => {
                out.push_str(r#"<strong class="text-yellow-300 font-bold">"#);
                out.push_str(&spans_html(inner));
                out.push_str("</strong>");
            }
            Span::Strong(inner) => {
                out.push_str(r#"<strong class="text-white font-bold">"#);
                out.push_str(&spans_html(inner));
                out.push_str("</strong>");
            }
            Span::Emphasis(inner) => {
                out.push_str(r#"<em class="text-gray-300 italic">"#);
                out.push_str(&spans_html(inner));
                out.push_str("</em>");
            }
            Span::LineBreak => out.push_str("<br>"),
        }
    }
    out
}

/// Raw action text goes through the same escape-then-format path as the report.
fn action_text_html(raw: &str) -> String {
    spans_html(&parse_inline(&escape_html(raw)))
}

fn action_card_html(action: &PriorityAction) -> String {
    let explanation = action_text_html(&action.explanation);
    match (action.category, &action.title) {
        (ActionCategory::Actionable, Some(title)) => format!(
            r#"<div class="improvement-card bg-gradient-to-r from-purple-500/10 to-blue-500/10 border border-purple-500/30 rounded-lg p-5 mb-4"><div class="flex items-start gap-3"><span class="text-2xl">🎯</span><div><h4 class="text-lg font-bold text-purple-300 mb-2">{}</h4><p class="text-gray-300 leading-relaxed">{explanation}</p></div></div></div>"#,
            action_text_html(title)
        ),
        (ActionCategory::Actionable, None) => format!(
            r#"<div class="improvement-card bg-purple-500/10 border-l-4 border-purple-500 pl-5 py-4 mb-3 rounded-r"><p class="text-gray-300 leading-relaxed">{explanation}</p></div>"#
        ),
        (ActionCategory::Advisory, _) => format!(
            r#"<div class="bg-yellow-500/10 border-l-4 border-yellow-500 pl-5 py-4 mb-3 rounded-r"><p class="text-gray-300 leading-relaxed">{explanation}</p></div>"#
        ),
    }
}

/// Renders the "Improvements" tab: action cards, or the pointer message when
/// no structured section was found.
pub fn render_actions_html(extracted: &ExtractedActions) -> String {
    let (icon, heading, footer) = match extracted.section {
        ActionSection::NotFound => return NO_ACTIONS_HTML.to_string(),
        ActionSection::TopPriority => ("🚀", "Focus on These Actions First", PRO_TIP_HTML),
        ActionSection::AreasForImprovement => ("⚠️", "Areas Needing Attention", ""),
    };
    if extracted.is_empty() {
        return NO_ACTIONS_HTML.to_string();
    }

    let cards: String = extracted.actions.iter().map(action_card_html).collect();
    format!(
        r#"<div class="space-y-4"><h3 class="text-2xl font-bold text-white mb-6 flex items-center gap-2"><span class="text-3xl">{icon}</span><span>{heading}</span></h3>{cards}{footer}</div>"#
    )
}
