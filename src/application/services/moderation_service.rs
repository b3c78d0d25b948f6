use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::{
        file::StorageLocation,
        moderation::{ModerationLabel, ToxicityResult, VideoJobStatus},
    },
};

/// Visual moderation of stored images and videos.
///
/// Implementations return every label the provider reports; confidence
/// filtering happens in the pipeline.
#[async_trait]
pub trait ContentModerator: Send + Sync {
    async fn moderate_image(
        &self,
        location: &StorageLocation,
    ) -> Result<Vec<ModerationLabel>, ApplicationError>;

    /// Submits an asynchronous video job and returns its identifier.
    async fn start_video_moderation(
        &self,
        location: &StorageLocation,
    ) -> Result<String, ApplicationError>;

    async fn video_moderation_status(
        &self,
        job_id: &str,
    ) -> Result<VideoJobStatus, ApplicationError>;
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the detected text lines joined by single spaces.
    async fn extract_text(&self, location: &StorageLocation) -> Result<String, ApplicationError>;
}

#[async_trait]
pub trait ToxicityClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ToxicityResult, ApplicationError>;
}
