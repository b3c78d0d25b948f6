use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Storage provider error: {0}")]
    Storage(String),

    #[error("Moderation provider error: {0}")]
    Moderation(String),

    #[error("Text extraction provider error: {0}")]
    TextExtraction(String),

    #[error("Toxicity provider error: {0}")]
    Toxicity(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<ProviderError> for ApplicationError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::Storage(msg) => {
                ApplicationError::StorageFailure(format!("Storage error: {}", msg))
            }
            other @ (ProviderError::Moderation(_)
            | ProviderError::TextExtraction(_)
            | ProviderError::Toxicity(_)
            | ProviderError::MalformedResponse(_)) => {
                ApplicationError::AnalysisFailure(other.to_string())
            }
        }
    }
}
