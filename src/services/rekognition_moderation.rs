use async_trait::async_trait;
use aws_sdk_rekognition::{
    error::DisplayErrorContext,
    types::{self as aws, Image, S3Object, Video},
    Client,
};
use tracing::debug;

use crate::{
    application::{error::ApplicationError, services::ContentModerator},
    domain::models::{
        file::StorageLocation,
        moderation::{ModerationLabel, VideoJobStatus},
    },
    services::error::ProviderError,
};

pub struct RekognitionModerator {
    client: Client,
}

impl RekognitionModerator {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    fn s3_object(location: &StorageLocation) -> S3Object {
        S3Object::builder()
            .bucket(&location.bucket)
            .name(&location.key)
            .build()
    }
}

fn to_label(label: &aws::ModerationLabel) -> ModerationLabel {
    ModerationLabel {
        name: label.name().unwrap_or("Unknown").to_string(),
        confidence: label.confidence().unwrap_or(0.0),
        parent_name: label
            .parent_name()
            .filter(|p| !p.is_empty())
            .map(str::to_string),
    }
}

#[async_trait]
impl ContentModerator for RekognitionModerator {
    async fn moderate_image(
        &self,
        location: &StorageLocation,
    ) -> Result<Vec<ModerationLabel>, ApplicationError> {
        let response = self
            .client
            .detect_moderation_labels()
            .image(Image::builder().s3_object(Self::s3_object(location)).build())
            .send()
            .await
            .map_err(|e| ProviderError::Moderation(DisplayErrorContext(e).to_string()))?;

        Ok(response.moderation_labels().iter().map(to_label).collect())
    }

    async fn start_video_moderation(
        &self,
        location: &StorageLocation,
    ) -> Result<String, ApplicationError> {
        let response = self
            .client
            .start_content_moderation()
            .video(Video::builder().s3_object(Self::s3_object(location)).build())
            .send()
            .await
            .map_err(|e| ProviderError::Moderation(DisplayErrorContext(e).to_string()))?;

        let job_id = response
            .job_id()
            .ok_or_else(|| ProviderError::MalformedResponse("No job ID returned".to_string()))?;

        Ok(job_id.to_string())
    }

    /// Reads the job status and, once it has succeeded, every page of
    /// detected labels.
    async fn video_moderation_status(
        &self,
        job_id: &str,
    ) -> Result<VideoJobStatus, ApplicationError> {
        let mut labels = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .get_content_moderation()
                .job_id(job_id)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| ProviderError::Moderation(DisplayErrorContext(e).to_string()))?;

            match response.job_status() {
                Some(aws::VideoJobStatus::Succeeded) => {}
                Some(aws::VideoJobStatus::InProgress) => return Ok(VideoJobStatus::InProgress),
                Some(aws::VideoJobStatus::Failed) => {
                    return Ok(VideoJobStatus::Failed(
                        response
                            .status_message()
                            .unwrap_or("Video analysis failed")
                            .to_string(),
                    ));
                }
                Some(other) => {
                    return Err(ProviderError::MalformedResponse(format!(
                        "Unexpected job status: {}",
                        other.as_str()
                    ))
                    .into());
                }
                None => {
                    return Err(ProviderError::MalformedResponse(
                        "No job status returned".to_string(),
                    )
                    .into());
                }
            }

            labels.extend(
                response
                    .moderation_labels()
                    .iter()
                    .filter_map(|detection| detection.moderation_label())
                    .map(to_label),
            );

            match response.next_token() {
                Some(token) if !token.is_empty() => {
                    debug!(job_id, "Fetching next page of video moderation labels");
                    next_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(VideoJobStatus::Succeeded(labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_provider_label() {
        let label = aws::ModerationLabel::builder()
            .name("Graphic Violence")
            .confidence(96.5)
            .parent_name("Violence")
            .build();

        assert_eq!(
            to_label(&label),
            ModerationLabel {
                name: "Graphic Violence".to_string(),
                confidence: 96.5,
                parent_name: Some("Violence".to_string()),
            }
        );
    }

    #[test]
    fn top_level_label_has_no_parent() {
        let label = aws::ModerationLabel::builder()
            .name("Violence")
            .confidence(91.0)
            .parent_name("")
            .build();

        let converted = to_label(&label);
        assert_eq!(converted.parent_name, None);
        assert!(converted.is_violation());
    }
}
