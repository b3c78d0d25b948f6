use async_trait::async_trait;
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, Client};
use bytes::Bytes;
use tracing::{error, info};

use crate::{
    application::{error::ApplicationError, services::ObjectStore},
    domain::models::file::{StorageLocation, UploadedFile},
    services::error::ProviderError,
};

pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        location: &StorageLocation,
        file: &UploadedFile,
    ) -> Result<(), ApplicationError> {
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .body(ByteStream::from(file.content.clone()))
            .content_type(&file.mime_type)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(e).to_string();
                error!(
                    error = %message,
                    bucket = %location.bucket,
                    key = %location.key,
                    size_bytes = file.size_bytes(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                ProviderError::Storage(message)
            })?;

        info!(
            bucket = %location.bucket,
            key = %location.key,
            size_bytes = file.size_bytes(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn get(&self, location: &StorageLocation) -> Result<Bytes, ApplicationError> {
        let output = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| ProviderError::Storage(DisplayErrorContext(e).to_string()))?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| ProviderError::Storage(e.to_string()))?;

        Ok(body.into_bytes())
    }

    async fn delete(&self, location: &StorageLocation) -> Result<(), ApplicationError> {
        self.client
            .delete_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| ProviderError::Storage(DisplayErrorContext(e).to_string()))?;

        info!(bucket = %location.bucket, key = %location.key, "S3 object deleted");
        Ok(())
    }
}
