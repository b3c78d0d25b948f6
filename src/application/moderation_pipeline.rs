use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    application::{
        error::ApplicationError,
        services::{ContentModerator, ObjectStore, TextExtractor, ToxicityClassifier},
    },
    domain::{
        config::settings::PollPolicy,
        models::{
            file::{MimeCategory, StorageLocation},
            moderation::{
                actionable_labels, RejectionDetail, RejectionReason, ToxicityResult, Verdict,
                VideoJobOutcome, VideoJobStatus,
            },
        },
    },
};

/// Injectable handles for every external provider the pipeline talks to.
#[derive(Clone)]
pub struct ProviderClients {
    pub store: Arc<dyn ObjectStore>,
    pub moderator: Arc<dyn ContentModerator>,
    pub extractor: Arc<dyn TextExtractor>,
    pub classifier: Arc<dyn ToxicityClassifier>,
}

type Rejection = (RejectionReason, RejectionDetail);

pub struct ModerationPipeline {
    clients: ProviderClients,
    poll: PollPolicy,
    public_base_url: String,
}

impl ModerationPipeline {
    pub fn new(clients: ProviderClients, poll: PollPolicy, public_base_url: String) -> Self {
        Self {
            clients,
            poll,
            public_base_url,
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.clients.store
    }

    /// Runs the checks for `category` against an already stored object.
    ///
    /// Content rejections come back as `Verdict::Rejected` after one
    /// best-effort delete of the object. Provider failures are returned as
    /// `Err` and leave the object in place.
    pub async fn evaluate(
        &self,
        category: MimeCategory,
        location: &StorageLocation,
    ) -> Result<Verdict, ApplicationError> {
        let rejection = match category {
            MimeCategory::Image => self.check_image(location).await?,
            MimeCategory::Video => self.check_video(location).await?,
            MimeCategory::Pdf => self.check_pdf(location).await?,
            MimeCategory::Unsupported => {
                Some((RejectionReason::UnsupportedType, RejectionDetail::None))
            }
        };

        match rejection {
            None => {
                info!(key = %location.key, ?category, "File passed moderation");
                Ok(Verdict::Accepted {
                    public_url: location.public_url(&self.public_base_url),
                })
            }
            Some((reason, detail)) => {
                warn!(key = %location.key, ?category, ?reason, "File rejected by moderation");
                self.rollback(location).await;
                Ok(Verdict::Rejected { reason, detail })
            }
        }
    }

    async fn check_image(
        &self,
        location: &StorageLocation,
    ) -> Result<Option<Rejection>, ApplicationError> {
        let labels = self.clients.moderator.moderate_image(location).await?;
        let violations = actionable_labels(labels);
        if !violations.is_empty() {
            return Ok(Some((
                RejectionReason::ContentViolation,
                RejectionDetail::Labels(violations),
            )));
        }

        Ok(self.toxic_text(location).await?.map(|result| {
            (
                RejectionReason::NegativeSentiment,
                RejectionDetail::Classifier(result.detail),
            )
        }))
    }

    async fn check_pdf(
        &self,
        location: &StorageLocation,
    ) -> Result<Option<Rejection>, ApplicationError> {
        Ok(self.toxic_text(location).await?.map(|result| {
            (
                RejectionReason::ToxicContent,
                RejectionDetail::Classifier(result.detail),
            )
        }))
    }

    async fn check_video(
        &self,
        location: &StorageLocation,
    ) -> Result<Option<Rejection>, ApplicationError> {
        match self.await_video_job(location).await? {
            VideoJobOutcome::Succeeded(labels) => {
                let violations = actionable_labels(labels);
                if violations.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some((
                        RejectionReason::ContentViolation,
                        RejectionDetail::Labels(violations),
                    )))
                }
            }
            VideoJobOutcome::Failed(message) => Err(ApplicationError::AnalysisFailure(format!(
                "Video analysis failed for {}: {}",
                location.key, message
            ))),
            VideoJobOutcome::TimedOut { attempts } => {
                Err(ApplicationError::AnalysisFailure(format!(
                    "Video analysis for {} did not finish after {} polls",
                    location.key, attempts
                )))
            }
        }
    }

    /// Extracts text and classifies it; `Some` only when the text is toxic.
    async fn toxic_text(
        &self,
        location: &StorageLocation,
    ) -> Result<Option<ToxicityResult>, ApplicationError> {
        let text = self.clients.extractor.extract_text(location).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let result = self.clients.classifier.classify(&text).await?;
        info!(
            key = %location.key,
            toxicity = result.toxicity_score,
            "Toxicity score computed"
        );

        Ok(result.is_toxic().then_some(result))
    }

    async fn await_video_job(
        &self,
        location: &StorageLocation,
    ) -> Result<VideoJobOutcome, ApplicationError> {
        let job_id = self.clients.moderator.start_video_moderation(location).await?;
        info!(key = %location.key, job_id = %job_id, "Video moderation job started");

        for attempt in 1..=self.poll.max_attempts {
            match self.clients.moderator.video_moderation_status(&job_id).await? {
                VideoJobStatus::Succeeded(labels) => {
                    return Ok(VideoJobOutcome::Succeeded(labels));
                }
                VideoJobStatus::Failed(message) => {
                    error!(job_id = %job_id, %message, "Video moderation job failed");
                    return Ok(VideoJobOutcome::Failed(message));
                }
                VideoJobStatus::InProgress => {
                    if attempt < self.poll.max_attempts {
                        tokio::time::sleep(self.poll.interval).await;
                    }
                }
            }
        }

        error!(job_id = %job_id, attempts = self.poll.max_attempts, "Video moderation job timed out");
        Ok(VideoJobOutcome::TimedOut {
            attempts: self.poll.max_attempts,
        })
    }

    /// Compensating delete. A failure here is logged and never replaces the
    /// verdict that triggered it.
    pub async fn rollback(&self, location: &StorageLocation) {
        if let Err(e) = self.clients.store.delete(location).await {
            error!(
                bucket = %location.bucket,
                key = %location.key,
                error = %e,
                "Failed to delete object during rollback"
            );
        }
    }
}
