use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of `POST /api/analyze` on the backend. Read-only on this side.
///
/// Fields this service does not interpret are kept in `extra` so the result
/// can be posted back for the PDF report without losing anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: u32,
    #[serde(default)]
    pub keyword_match: u32,
    #[serde(default)]
    pub matching_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub detailed_analysis: Option<String>,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The resume file as received from the browser.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: bytes::Bytes,
}
