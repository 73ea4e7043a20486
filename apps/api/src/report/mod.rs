// Analysis report rendering.
// Implements: sanitization, line classification, inline formatting,
// priority-action extraction, and the HTML presentation of both.
// Everything here is synchronous and pure; handlers call it after the backend responds.

pub mod actions;
pub mod blocks;
pub mod document;
pub mod handlers;
pub mod html;
pub mod inline;
pub mod sanitize;

// Re-export the public API consumed by the analysis handlers.
pub use actions::{extract_priority_actions, ExtractedActions};
pub use blocks::render;
pub use document::RenderedDocument;
pub use html::{render_actions_html, render_html};

use serde::Serialize;

/// Everything the front-end needs to fill the "Detailed Analysis" and
/// "Improvements" tabs for one report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub document: RenderedDocument,
    pub html: String,
    pub actions: ExtractedActions,
    pub actions_html: String,
}

impl ReportView {
    pub fn build(detailed_analysis: Option<&str>) -> Self {
        let document = render(detailed_analysis);
        let html = render_html(&document);
        // extraction reads the same raw text, after the main render
        let actions = detailed_analysis
            .map(extract_priority_actions)
            .unwrap_or_else(ExtractedActions::not_found);
        let actions_html = render_actions_html(&actions);
        ReportView {
            document,
            html,
            actions,
            actions_html,
        }
    }
}
