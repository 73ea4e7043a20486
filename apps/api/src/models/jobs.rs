use serde::{Deserialize, Serialize};

/// Body of `POST /api/job-recommendations` on the backend.
#[derive(Debug, Clone, Serialize)]
pub struct JobSearchRequest {
    pub resume_text: String,
    pub resume_keywords: ResumeKeywords,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResumeKeywords {
    pub technical_skills: Vec<String>,
    pub experience_requirements: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobRecommendations {
    pub success: bool,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub search_params: Option<SearchParams>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub posted_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub apply_link: String,
    #[serde(default)]
    pub match_score: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub skills: Vec<String>,
}
