pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::report::handlers as report;
use crate::state::AppState;

/// Room for the job description and multipart framing on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analyze",
            post(analysis::handle_analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/jobs/recommendations",
            post(analysis::handle_job_recommendations),
        )
        .route("/api/v1/rewrite", post(analysis::handle_rewrite_section))
        // Report API
        .route("/api/v1/report/render", post(report::handle_render_report))
        .route(
            "/api/v1/report/download",
            post(analysis::handle_download_report),
        )
        .route("/api/v1/report/email", post(analysis::handle_email_report))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::backend_client::{AnalysisBackend, BackendError};
    use crate::config::Config;
    use crate::models::analysis::{AnalysisResult, ResumeUpload};
    use crate::models::jobs::{Job, JobRecommendations, JobSearchRequest, SearchParams};
    use crate::models::rewrite::{RewriteRequest, RewrittenSection, SectionType};

    const BOUNDARY: &str = "X-ANALYZER-TEST-BOUNDARY";
    const JOB_DESCRIPTION: &str = "Senior Rust Engineer. You will build distributed systems with tokio and axum.";
    const REPORT: &str = "## 📊 OVERVIEW\nStrong **systems** background.\n\n## 🚀 TOP 3 PRIORITY ACTIONS\n1. **Add metrics** - Quantify the latency work\n2. Mention Kubernetes: It appears 4 times in the posting\n3. Shorten the summary\n";

    /// Records what the handlers sent and replies with canned data.
    #[derive(Default)]
    struct StubBackend {
        detailed_analysis: Option<String>,
        seen_job_description: Mutex<Option<String>>,
        seen_search: Mutex<Option<JobSearchRequest>>,
        seen_email: Mutex<Option<(String, u32)>>,
        seen_rewrite: Mutex<Option<RewriteRequest>>,
    }

    #[async_trait]
    impl AnalysisBackend for StubBackend {
        async fn analyze(
            &self,
            upload: &ResumeUpload,
            job_description: &str,
        ) -> Result<AnalysisResult, BackendError> {
            *self.seen_job_description.lock().unwrap() = Some(job_description.to_string());
            Ok(AnalysisResult {
                ats_score: 64,
                keyword_match: 58,
                matching_keywords: vec!["rust".into(), "tokio".into()],
                missing_keywords: vec!["kubernetes".into()],
                detailed_analysis: self.detailed_analysis.clone(),
                resume_text: "Jane Doe, Rust engineer".into(),
                feedback: vec!["✅ One page".into(), "❌ No summary".into()],
                filename: Some(upload.file_name.clone()),
                ..Default::default()
            })
        }

        async fn job_recommendations(
            &self,
            request: &JobSearchRequest,
        ) -> Result<JobRecommendations, BackendError> {
            *self.seen_search.lock().unwrap() = Some(request.clone());
            Ok(JobRecommendations {
                success: true,
                jobs: vec![Job {
                    title: "Rust Engineer".into(),
                    company: "Ferrous".into(),
                    match_score: 91,
                    ..Default::default()
                }],
                search_params: Some(SearchParams {
                    query: Some("rust engineer".into()),
                    experience_level: "mid_level".into(),
                    skills: vec!["rust".into()],
                }),
                error: None,
            })
        }

        async fn download_report(&self, _result: &AnalysisResult) -> Result<Bytes, BackendError> {
            Ok(Bytes::from_static(b"%PDF-1.7 stub"))
        }

        async fn send_report(
            &self,
            email: &str,
            result: &AnalysisResult,
        ) -> Result<(), BackendError> {
            *self.seen_email.lock().unwrap() = Some((email.to_string(), result.ats_score));
            Ok(())
        }

        async fn rewrite_section(
            &self,
            request: &RewriteRequest,
        ) -> Result<RewrittenSection, BackendError> {
            *self.seen_rewrite.lock().unwrap() = Some(request.clone());
            Ok(RewrittenSection {
                rewritten_text: format!("Rewritten: {}", request.current_text),
                improvements: vec!["Stronger verbs".into()],
            })
        }
    }

    fn app_with(backend: Arc<StubBackend>) -> Router {
        build_router(AppState {
            backend,
            config: Config::default(),
        })
    }

    fn stub_with_report() -> Arc<StubBackend> {
        Arc::new(StubBackend {
            detailed_analysis: Some(REPORT.to_string()),
            ..Default::default()
        })
    }

    fn multipart_body(content_type: &str, job_description: &str) -> Body {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"jane.pdf\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             %PDF-1.4 fake resume bytes\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"job_description\"\r\n\r\n\
             {job_description}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Body::from(body)
    }

    fn analyze_request(content_type: &str, job_description: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(content_type, job_description))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app_with(Arc::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_full_view() {
        let backend = stub_with_report();
        let response = app_with(backend.clone())
            .oneshot(analyze_request("application/pdf", JOB_DESCRIPTION))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["file"]["name"], "jane.pdf");
        assert_eq!(json["score"]["value"], 64);
        assert_eq!(json["score"]["tone"], "good");
        assert_eq!(json["keywords"]["missing_count"], 1);
        assert_eq!(json["feedback"][1]["level"], "error");
        assert_eq!(json["report"]["actions"]["section"], "top_priority");
        assert_eq!(json["report"]["actions"]["actions"].as_array().unwrap().len(), 3);
        assert_eq!(json["report"]["actions"]["actions"][1]["title"], "Mention Kubernetes");
        assert_eq!(json["report"]["document"]["blocks"][0]["type"], "heading");
        assert_eq!(json["result"]["resume_text"], "Jane Doe, Rust engineer");

        let seen = backend.seen_job_description.lock().unwrap().clone();
        assert_eq!(seen.as_deref(), Some(JOB_DESCRIPTION));
    }

    #[tokio::test]
    async fn test_analyze_rejects_unsupported_file_type() {
        let response = app_with(stub_with_report())
            .oneshot(analyze_request("image/png", JOB_DESCRIPTION))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_short_job_description() {
        let backend = stub_with_report();
        let response = app_with(backend.clone())
            .oneshot(analyze_request("application/pdf", "Rust dev"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(backend.seen_job_description.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_analyze_without_report_is_unprocessable() {
        let response = app_with(Arc::default())
            .oneshot(analyze_request("application/pdf", JOB_DESCRIPTION))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "No analysis in response"
        );
    }

    #[tokio::test]
    async fn test_render_endpoint_is_pure() {
        let response = app_with(Arc::default())
            .oneshot(json_request(
                "/api/v1/report/render",
                json!({ "detailed_analysis": "- a\n- b\n- c\nand enough trailing text to pass the length check" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let blocks = json["document"]["blocks"].as_array().unwrap();
        assert_eq!(blocks[0]["type"], "list");
        assert_eq!(blocks[0]["items"].as_array().unwrap().len(), 3);
        assert_eq!(json["actions"]["section"], "not_found");
    }

    #[tokio::test]
    async fn test_render_endpoint_short_text() {
        let response = app_with(Arc::default())
            .oneshot(json_request("/api/v1/report/render", json!({ "detailed_analysis": "" })))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["document"]["blocks"], json!([{ "type": "unavailable" }]));
    }

    #[tokio::test]
    async fn test_job_recommendations_use_default_location() {
        let backend = Arc::new(StubBackend::default());
        let response = app_with(backend.clone())
            .oneshot(json_request(
                "/api/v1/jobs/recommendations",
                json!({ "resume_text": "Jane", "matching_keywords": ["rust"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["jobs"][0]["match_tone"], "green");
        assert_eq!(json["search"]["experience_level"], "MID LEVEL");
        assert_eq!(json["no_jobs_found"], false);

        let seen = backend.seen_search.lock().unwrap().clone().unwrap();
        assert_eq!(seen.location, "United States");
        assert_eq!(seen.resume_keywords.technical_skills, ["rust"]);
    }

    #[tokio::test]
    async fn test_download_report_sets_pdf_headers() {
        let response = app_with(Arc::default())
            .oneshot(json_request("/api/v1/report/download", json!({ "ats_score": 70 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"ATS_Report_"));
        assert!(disposition.ends_with(".pdf\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_email_report_forwards_trimmed_address() {
        let backend = Arc::new(StubBackend::default());
        let response = app_with(backend.clone())
            .oneshot(json_request(
                "/api/v1/report/email",
                json!({ "email": " jane@example.com ", "analysis_data": { "ats_score": 81 } }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["message"],
            "Report sent successfully to jane@example.com!"
        );

        let seen = backend.seen_email.lock().unwrap().clone();
        assert_eq!(seen, Some(("jane@example.com".to_string(), 81)));
    }

    #[tokio::test]
    async fn test_email_report_rejects_bad_address() {
        let backend = Arc::new(StubBackend::default());
        let response = app_with(backend.clone())
            .oneshot(json_request(
                "/api/v1/report/email",
                json!({ "email": "not-an-address", "analysis_data": { "ats_score": 81 } }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(backend.seen_email.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_report_requires_analysis() {
        let response = app_with(Arc::default())
            .oneshot(json_request(
                "/api/v1/report/email",
                json!({ "email": "jane@example.com" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"]["message"],
            "No analysis data available"
        );
    }

    #[tokio::test]
    async fn test_rewrite_section() {
        let backend = Arc::new(StubBackend::default());
        let response = app_with(backend.clone())
            .oneshot(json_request(
                "/api/v1/rewrite",
                json!({
                    "section_type": "Experience",
                    "current_text": "  Worked on backend APIs  ",
                    "job_description": "Rust engineer",
                    "matching_keywords": ["rust", "tokio"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["section_type"], "experience");
        assert_eq!(json["rewritten_text"], "Rewritten: Worked on backend APIs");
        assert_eq!(json["improvements"][0], "Stronger verbs");

        let seen = backend.seen_rewrite.lock().unwrap().clone().unwrap();
        assert_eq!(seen.section_type, SectionType::Experience);
        assert_eq!(seen.resume_keywords.technical_skills, ["rust", "tokio"]);
    }

    #[tokio::test]
    async fn test_rewrite_rejects_short_text() {
        let backend = Arc::new(StubBackend::default());
        let response = app_with(backend.clone())
            .oneshot(json_request(
                "/api/v1/rewrite",
                json!({ "section_type": "summary", "current_text": "short" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(backend.seen_rewrite.lock().unwrap().is_none());
    }
}
