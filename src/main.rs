mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{routes::build_router, state::AppState};
use application::{moderation_pipeline::ModerationPipeline, upload_orchestrator::UploadOrchestrator};
use domain::config::settings::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Initialize AWS SDK crypto provider (required before any AWS SDK operations)
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let settings = Settings::from_env().unwrap_or_else(|e| panic!("ERROR: {}", e));

    tracing::info!(
        bucket = %settings.bucket,
        region = %settings.region,
        static_credentials = settings.credentials.is_some(),
        "Starting moderated-intake"
    );

    let aws_config = services::load_aws_config(&settings).await;
    let clients = services::create_provider_clients(&aws_config);

    let pipeline = ModerationPipeline::new(
        clients,
        settings.poll,
        settings.public_base_url.clone(),
    );
    let orchestrator = UploadOrchestrator::new(
        pipeline,
        settings.bucket.clone(),
        settings.default_folder.clone(),
    );

    let port = settings.port;
    let app_state = AppState {
        settings: Arc::new(settings),
        orchestrator: Arc::new(orchestrator),
    };

    let router = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
