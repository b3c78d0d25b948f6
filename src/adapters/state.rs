use axum::extract::FromRef;
use std::sync::Arc;

use crate::{application::upload_orchestrator::UploadOrchestrator, domain::config::settings::Settings};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub orchestrator: Arc<UploadOrchestrator>,
}
