pub mod error;
pub mod moderation_pipeline;
pub mod services;
pub mod upload_orchestrator;
