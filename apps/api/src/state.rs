use std::sync::Arc;

use crate::backend_client::AnalysisBackend;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable backend. Default: `BackendClient` over HTTP; tests use a stub.
    pub backend: Arc<dyn AnalysisBackend>,
    pub config: Config,
}
