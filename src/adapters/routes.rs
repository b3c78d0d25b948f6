use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::adapters::{
    controllers::{health_controller::HealthController, upload_controller::UploadController},
    state::AppState,
};

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    match allowed_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    }
}

pub fn build_router(app_state: AppState) -> Router {
    let cors = cors_layer(app_state.settings.cors_allowed_origins.as_deref());
    let body_limit = DefaultBodyLimit::max(app_state.settings.max_upload_bytes);

    Router::new()
        .route("/health", get(HealthController::health_check))
        .route("/upload/image", post(UploadController::upload_image))
        .route("/upload/pdf", post(UploadController::upload_pdf))
        .route("/upload/multiple", post(UploadController::upload_multiple))
        .route("/upload/video", post(UploadController::upload_video))
        .route("/upload/uni", post(UploadController::upload_universal))
        .layer(body_limit)
        .layer(cors)
        .with_state(app_state)
}
