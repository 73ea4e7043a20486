//! Backend client: the single point of entry for all calls to the analysis backend.
//!
//! Handlers never talk to the backend directly; they go through the
//! `AnalysisBackend` trait carried in `AppState`, so tests can swap in a stub.
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::analysis::{AnalysisResult, ResumeUpload};
use crate::models::email::{EmailReportRequest, EmailReportResponse};
use crate::models::jobs::{JobRecommendations, JobSearchRequest};
use crate::models::rewrite::{RewriteRequest, RewriteResponse, RewrittenSection};

const MAX_ATTEMPTS: u32 = 3;
/// First backoff delay; doubles on every further attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Backend rejected request: {0}")]
    Rejected(String),
}

#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    error: String,
}

/// Operations the service needs from the analysis backend.
///
/// Carried in `AppState` as `Arc<dyn AnalysisBackend>`.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(
        &self,
        upload: &ResumeUpload,
        job_description: &str,
    ) -> Result<AnalysisResult, BackendError>;

    async fn job_recommendations(
        &self,
        request: &JobSearchRequest,
    ) -> Result<JobRecommendations, BackendError>;

    /// Returns the PDF bytes of the printable report.
    async fn download_report(&self, result: &AnalysisResult) -> Result<Bytes, BackendError>;

    /// Asks the backend to e-mail the report for `result` to `email`.
    async fn send_report(&self, email: &str, result: &AnalysisResult) -> Result<(), BackendError>;

    async fn rewrite_section(
        &self,
        request: &RewriteRequest,
    ) -> Result<RewrittenSection, BackendError>;
}

/// HTTP implementation of [`AnalysisBackend`] with retry on 429/5xx.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    retry_base_delay: Duration,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_base_delay: RETRY_BASE_DELAY,
        })
    }

    #[cfg(test)]
    fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request built by `build`, retrying on 429, 5xx and transport
    /// errors with exponential backoff. `build` runs once per attempt because
    /// multipart bodies cannot be replayed. The last attempt's error is returned.
    async fn send<F>(&self, build: F) -> Result<Response, BackendError>
    where
        F: Fn() -> Result<RequestBuilder, BackendError> + Send + Sync,
    {
        let mut attempt = 1;
        loop {
            let error = match build()?.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Backend call succeeded with {}", response.status());
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    let error = BackendError::Api {
                        status: status.as_u16(),
                        message: error_message(body),
                    };
                    if !is_retryable(status) {
                        return Err(error);
                    }
                    error
                }
                Err(e) => BackendError::Http(e),
            };

            if attempt >= MAX_ATTEMPTS {
                return Err(error);
            }

            // Exponential backoff: base, 2x base
            let delay = self.retry_base_delay * (1 << (attempt - 1));
            warn!(
                "Backend call attempt {} failed ({}), retrying after {}ms...",
                attempt,
                error,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl AnalysisBackend for BackendClient {
    async fn analyze(
        &self,
        upload: &ResumeUpload,
        job_description: &str,
    ) -> Result<AnalysisResult, BackendError> {
        let url = self.endpoint("/api/analyze");
        let response = self
            .send(|| {
                let resume = multipart::Part::bytes(upload.bytes.to_vec())
                    .file_name(upload.file_name.clone())
                    .mime_str(&upload.content_type)?;
                let form = multipart::Form::new()
                    .part("resume", resume)
                    .text("job_description", job_description.to_string());
                Ok(self.client.post(&url).multipart(form))
            })
            .await?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn job_recommendations(
        &self,
        request: &JobSearchRequest,
    ) -> Result<JobRecommendations, BackendError> {
        let url = self.endpoint("/api/job-recommendations");
        let response = self
            .send(|| Ok(self.client.post(&url).json(request)))
            .await?;

        let body = response.bytes().await?;
        let recommendations: JobRecommendations = serde_json::from_slice(&body)?;
        if !recommendations.success {
            return Err(BackendError::Rejected(
                recommendations
                    .error
                    .unwrap_or_else(|| "Failed to fetch jobs".to_string()),
            ));
        }
        Ok(recommendations)
    }

    async fn download_report(&self, result: &AnalysisResult) -> Result<Bytes, BackendError> {
        let url = self.endpoint("/api/download-report");
        let response = self.send(|| Ok(self.client.post(&url).json(result))).await?;
        Ok(response.bytes().await?)
    }

    async fn send_report(&self, email: &str, result: &AnalysisResult) -> Result<(), BackendError> {
        let url = self.endpoint("/api/send-email");
        let payload = EmailReportRequest {
            email,
            analysis_data: result,
        };
        let response = self
            .send(|| Ok(self.client.post(&url).json(&payload)))
            .await?;

        let body = response.bytes().await?;
        let sent: EmailReportResponse = serde_json::from_slice(&body)?;
        if !sent.success {
            return Err(BackendError::Rejected(
                sent.error
                    .unwrap_or_else(|| "Failed to send email".to_string()),
            ));
        }
        Ok(())
    }

    async fn rewrite_section(
        &self,
        request: &RewriteRequest,
    ) -> Result<RewrittenSection, BackendError> {
        let url = self.endpoint("/api/ai-rewrite");
        let response = self
            .send(|| Ok(self.client.post(&url).json(request)))
            .await?;

        let body = response.bytes().await?;
        let rewrite: RewriteResponse = serde_json::from_slice(&body)?;
        if !rewrite.success {
            return Err(BackendError::Rejected(
                rewrite
                    .error
                    .unwrap_or_else(|| "Failed to generate rewrite".to_string()),
            ));
        }
        Ok(RewrittenSection {
            rewritten_text: rewrite.rewritten_text,
            improvements: rewrite.improvements,
        })
    }
}

/// Pulls `error` out of a `{"error": "..."}` body, or returns the body as-is.
fn error_message(body: String) -> String {
    serde_json::from_str::<BackendErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body)
}
