//! Axum route handlers for the Report API.

use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::report::ReportView;

#[derive(Debug, Deserialize)]
pub struct RenderReportRequest {
    #[serde(default)]
    pub detailed_analysis: Option<String>,
}

/// POST /api/v1/report/render
///
/// Renders raw analysis text without calling the backend. Used by the front-end
/// to re-render a stored result, and handy for checking report formatting.
pub async fn handle_render_report(Json(request): Json<RenderReportRequest>) -> Json<ReportView> {
    let view = ReportView::build(request.detailed_analysis.as_deref());
    info!(
        "Rendered report: {} blocks, {} actions ({:?})",
        view.document.blocks.len(),
        view.actions.actions.len(),
        view.actions.section
    );
    Json(view)
}
