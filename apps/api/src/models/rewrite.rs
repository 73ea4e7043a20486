use serde::{Deserialize, Serialize};

/// Resume section the backend can rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Summary,
    Experience,
    Skills,
}

impl SectionType {
    /// Case-insensitive lookup of a section name as the front-end sends it.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "summary" => Some(SectionType::Summary),
            "experience" => Some(SectionType::Experience),
            "skills" => Some(SectionType::Skills),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteKeywords {
    pub technical_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewriteRequest {
    pub section_type: SectionType,
    pub current_text: String,
    pub job_description: String,
    pub resume_keywords: RewriteKeywords,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewriteResponse {
    pub success: bool,
    #[serde(default)]
    pub rewritten_text: String,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What a successful rewrite yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewrittenSection {
    pub rewritten_text: String,
    pub improvements: Vec<String>,
}
