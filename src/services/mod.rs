mod comprehend_toxicity;
mod error;
#[cfg(test)]
pub mod fake;
mod rekognition_moderation;
mod s3_storage;
mod textract_extraction;

pub use comprehend_toxicity::ComprehendClassifier;
pub use rekognition_moderation::RekognitionModerator;
pub use s3_storage::S3ObjectStore;
pub use textract_extraction::TextractExtractor;

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;

use crate::{application::moderation_pipeline::ProviderClients, domain::config::settings::Settings};

pub async fn load_aws_config(settings: &Settings) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(settings.region.clone()));

    if let Some(creds) = &settings.credentials {
        loader = loader.credentials_provider(Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            creds.session_token.clone(),
            None,
            "environment",
        ));
    }

    loader.load().await
}

/// Builds one client per provider from a shared AWS config.
pub fn create_provider_clients(config: &SdkConfig) -> ProviderClients {
    ProviderClients {
        store: Arc::new(S3ObjectStore::new(config)),
        moderator: Arc::new(RekognitionModerator::new(config)),
        extractor: Arc::new(TextractExtractor::new(config)),
        classifier: Arc::new(ComprehendClassifier::new(config)),
    }
}
