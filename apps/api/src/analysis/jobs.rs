//! Job recommendation views: search summary and job cards.

use serde::Serialize;

use crate::models::jobs::{Job, JobRecommendations, SearchParams};

const MAX_SKILLS_SHOWN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTone {
    Green,
    Yellow,
    Purple,
}

impl MatchTone {
    pub fn for_score(score: u32) -> Self {
        match score {
            85.. => MatchTone::Green,
            70..=84 => MatchTone::Yellow,
            _ => MatchTone::Purple,
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            MatchTone::Green => "bg-green-500/20 text-green-400 border-green-500/30",
            MatchTone::Yellow => "bg-yellow-500/20 text-yellow-400 border-yellow-500/30",
            MatchTone::Purple => "bg-purple-500/20 text-purple-400 border-purple-500/30",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    #[serde(flatten)]
    pub job: Job,
    pub match_tone: MatchTone,
    pub badge_class: &'static str,
}

impl From<Job> for JobCard {
    fn from(job: Job) -> Self {
        let match_tone = MatchTone::for_score(job.match_score);
        JobCard {
            job,
            match_tone,
            badge_class: match_tone.badge_class(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    pub query: String,
    pub experience_level: String,
    pub skills: Vec<String>,
}

impl From<&SearchParams> for SearchSummary {
    fn from(params: &SearchParams) -> Self {
        let query = params
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or("N/A")
            .to_string();
        SearchSummary {
            query,
            experience_level: params.experience_level.replace('_', " ").to_uppercase(),
            skills: params.skills.iter().take(MAX_SKILLS_SHOWN).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobsView {
    pub search: Option<SearchSummary>,
    pub jobs: Vec<JobCard>,
    pub no_jobs_found: bool,
}

impl From<JobRecommendations> for JobsView {
    fn from(recommendations: JobRecommendations) -> Self {
        let no_jobs_found = recommendations.jobs.is_empty();
        JobsView {
            // the search box is only shown alongside results
            search: if no_jobs_found {
                None
            } else {
                recommendations.search_params.as_ref().map(SearchSummary::from)
            },
            jobs: recommendations.jobs.into_iter().map(JobCard::from).collect(),
            no_jobs_found,
        }
    }
}
