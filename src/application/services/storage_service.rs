use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{StorageLocation, UploadedFile},
};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, location: &StorageLocation, file: &UploadedFile)
        -> Result<(), ApplicationError>;
    async fn get(&self, location: &StorageLocation) -> Result<Bytes, ApplicationError>;
    async fn delete(&self, location: &StorageLocation) -> Result<(), ApplicationError>;
}
