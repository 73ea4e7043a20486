//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::jobs::JobsView;
use crate::analysis::validation::{
    format_file_size, validate_email, validate_job_description, validate_resume, validate_rewrite,
};
use crate::analysis::views::{feedback_view, FeedbackItem, KeywordsView, ScoreView};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, ResumeUpload};
use crate::models::jobs::{JobSearchRequest, ResumeKeywords};
use crate::models::rewrite::{RewriteKeywords, RewriteRequest, SectionType};
use crate::report::ReportView;
use crate::state::AppState;

/// Reports shorter than this are still rendered, but usually mean the backend's model call failed.
const SUSPICIOUSLY_SHORT_ANALYSIS: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadSummary {
    pub name: String,
    pub size: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisView {
    pub file: UploadSummary,
    pub score: ScoreView,
    pub keywords: KeywordsView,
    pub feedback: Vec<FeedbackItem>,
    pub report: ReportView,
    /// The untouched backend result; the front-end posts it back for jobs and the PDF.
    pub result: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct JobsRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub matching_keywords: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailReportBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub analysis_data: Option<AnalysisResult>,
}

#[derive(Debug, Serialize)]
pub struct EmailReportView {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RewriteBody {
    #[serde(default)]
    pub section_type: Option<String>,
    #[serde(default)]
    pub current_text: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub matching_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteView {
    pub section_type: SectionType,
    pub rewritten_text: String,
    pub improvements: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form with a `resume` file and a `job_description` text field.
/// Validates both, forwards them to the backend, and returns every view the
/// results page needs.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisView>, AppError> {
    let (upload, job_description) = read_analyze_form(multipart).await?;

    validate_resume(
        &upload.content_type,
        upload.bytes.len(),
        state.config.max_upload_bytes,
    )?;
    let job_description = validate_job_description(&job_description)?;

    info!(
        "Sending analysis request: file={} ({}), jd_length={} chars",
        upload.file_name,
        format_file_size(upload.bytes.len() as u64),
        job_description.chars().count()
    );

    let result = state.backend.analyze(&upload, job_description).await?;

    let analysis_len = match result.detailed_analysis.as_deref() {
        Some(text) if !text.is_empty() => text.chars().count(),
        _ => {
            return Err(AppError::UnprocessableEntity(
                "No analysis in response".to_string(),
            ))
        }
    };
    if analysis_len < SUSPICIOUSLY_SHORT_ANALYSIS {
        warn!("Analysis seems very short ({analysis_len} chars)");
    }
    info!(
        "Analysis received: score={}, keyword_match={}%, analysis_length={}",
        result.ats_score, result.keyword_match, analysis_len
    );

    Ok(Json(build_view(&upload, result)))
}

/// POST /api/v1/jobs/recommendations
///
/// Asks the backend for openings matching the analyzed resume.
pub async fn handle_job_recommendations(
    State(state): State<AppState>,
    Json(request): Json<JobsRequest>,
) -> Result<Json<JobsView>, AppError> {
    let location = request
        .location
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| state.config.job_search_location.clone());

    let search = JobSearchRequest {
        resume_text: request.resume_text,
        resume_keywords: ResumeKeywords {
            technical_skills: request.matching_keywords,
            experience_requirements: Vec::new(),
        },
        location,
    };

    let recommendations = state.backend.job_recommendations(&search).await?;
    info!("Received {} job recommendations", recommendations.jobs.len());

    Ok(Json(JobsView::from(recommendations)))
}

/// POST /api/v1/report/download
///
/// Proxies the printable PDF report for a previously returned analysis result.
pub async fn handle_download_report(
    State(state): State<AppState>,
    Json(result): Json<AnalysisResult>,
) -> Result<Response, AppError> {
    info!(
        "Requesting PDF report: score={}, filename={:?}",
        result.ats_score, result.filename
    );
    let pdf = state.backend.download_report(&result).await?;
    info!("PDF received: {} bytes", pdf.len());

    let disposition = format!("attachment; filename=\"{}\"", report_file_name(chrono::Utc::now()));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// POST /api/v1/report/email
///
/// Has the backend e-mail the report for a previously returned analysis result.
pub async fn handle_email_report(
    State(state): State<AppState>,
    Json(body): Json<EmailReportBody>,
) -> Result<Json<EmailReportView>, AppError> {
    let email = validate_email(&body.email)?;
    let result = body
        .analysis_data
        .ok_or_else(|| AppError::Validation("No analysis data available".to_string()))?;

    info!("Sending report e-mail: score={}", result.ats_score);
    state.backend.send_report(email, &result).await?;
    info!("Report e-mail sent");

    Ok(Json(EmailReportView {
        email: email.to_string(),
        message: format!("Report sent successfully to {email}!"),
    }))
}

/// POST /api/v1/rewrite
///
/// Asks the backend to rewrite one resume section against the job description.
pub async fn handle_rewrite_section(
    State(state): State<AppState>,
    Json(body): Json<RewriteBody>,
) -> Result<Json<RewriteView>, AppError> {
    let (section_type, current_text) =
        validate_rewrite(body.section_type.as_deref(), &body.current_text)?;

    let request = RewriteRequest {
        section_type,
        current_text: current_text.to_string(),
        job_description: body.job_description.trim().to_string(),
        resume_keywords: RewriteKeywords {
            technical_skills: body.matching_keywords,
        },
    };

    info!(
        "Requesting {:?} rewrite: text_length={} chars",
        section_type,
        current_text.chars().count()
    );
    let rewritten = state.backend.rewrite_section(&request).await?;
    info!(
        "Rewrite received: {} improvements",
        rewritten.improvements.len()
    );

    Ok(Json(RewriteView {
        section_type,
        rewritten_text: rewritten.rewritten_text,
        improvements: rewritten.improvements,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_analyze_form(mut multipart: Multipart) -> Result<(ResumeUpload, String), AppError> {
    let mut upload: Option<ResumeUpload> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                upload = Some(ResumeUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some("job_description") => {
                job_description = field.text().await.map_err(multipart_error)?;
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| {
        AppError::Validation("Please upload a resume and provide a job description".to_string())
    })?;
    Ok((upload, job_description))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

fn build_view(upload: &ResumeUpload, result: AnalysisResult) -> AnalysisView {
    AnalysisView {
        file: UploadSummary {
            name: upload.file_name.clone(),
            size: format_file_size(upload.bytes.len() as u64),
        },
        score: ScoreView::new(result.ats_score),
        keywords: KeywordsView::new(
            result.keyword_match,
            &result.matching_keywords,
            &result.missing_keywords,
        ),
        feedback: feedback_view(&result.feedback),
        report: ReportView::build(result.detailed_analysis.as_deref()),
        result,
    }
}

fn report_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("ATS_Report_{}.pdf", now.format("%Y-%m-%dT%H-%M-%S"))
}
