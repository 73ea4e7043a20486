use serde::{Deserialize, Serialize};

use crate::models::analysis::AnalysisResult;

#[derive(Debug, Clone, Serialize)]
pub struct EmailReportRequest<'a> {
    pub email: &'a str,
    pub analysis_data: &'a AnalysisResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailReportResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
