use futures::future::join_all;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, moderation_pipeline::ModerationPipeline},
    domain::models::{
        file::{MimeCategory, StorageLocation, UploadedFile},
        moderation::{RejectionDetail, RejectionReason, Verdict},
    },
};

/// How a call site decides which checks a file gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Dispatch on the file's own MIME type.
    Detect,
    /// Only files of this category are evaluated; anything else is
    /// rejected as unsupported.
    Expect(MimeCategory),
}

impl CategoryPolicy {
    pub fn category_for(&self, file: &UploadedFile) -> MimeCategory {
        let detected = file.category();
        match self {
            CategoryPolicy::Detect => detected,
            CategoryPolicy::Expect(expected) if *expected == detected => detected,
            CategoryPolicy::Expect(_) => MimeCategory::Unsupported,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedFile {
    pub original_name: String,
    pub key: String,
    pub public_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedFile {
    pub original_name: String,
    pub key: String,
    pub category: MimeCategory,
    pub reason: RejectionReason,
    pub detail: RejectionDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Accepted(Vec<AcceptedFile>),
    Rejected(RejectedFile),
}

pub struct UploadOrchestrator {
    pipeline: ModerationPipeline,
    bucket: String,
    default_folder: String,
}

impl UploadOrchestrator {
    pub fn new(pipeline: ModerationPipeline, bucket: String, default_folder: String) -> Self {
        Self {
            pipeline,
            bucket,
            default_folder,
        }
    }

    pub fn location_for(&self, folder: Option<&str>, file: &UploadedFile) -> StorageLocation {
        StorageLocation::for_upload(
            &self.bucket,
            folder,
            &self.default_folder,
            &file.original_name,
        )
    }

    /// Stores every file concurrently, then evaluates them in order.
    ///
    /// A batch is confirmed all-or-none: the first rejection or analysis
    /// failure stops evaluation and every object the batch stored is
    /// deleted (best effort) before the outcome is returned.
    pub async fn upload(
        &self,
        files: Vec<UploadedFile>,
        folder: Option<&str>,
        policy: CategoryPolicy,
    ) -> Result<UploadOutcome, ApplicationError> {
        if files.is_empty() {
            return Err(ApplicationError::BadRequest(
                "No file provided".to_string(),
            ));
        }

        let batch_id = Uuid::new_v4();
        let entries: Vec<(UploadedFile, StorageLocation)> = files
            .into_iter()
            .map(|file| {
                let location = self.location_for(folder, &file);
                (file, location)
            })
            .collect();

        info!(%batch_id, files = entries.len(), bucket = %self.bucket, "Storing upload batch");
        self.store_all(&entries).await?;

        let mut accepted = Vec::with_capacity(entries.len());
        for (index, (file, location)) in entries.iter().enumerate() {
            let category = policy.category_for(file);
            info!(
                %batch_id,
                key = %location.key,
                mime_type = %file.mime_type,
                size_bytes = file.size_bytes(),
                ?category,
                "Evaluating file"
            );

            match self.pipeline.evaluate(category, location).await {
                Ok(Verdict::Accepted { public_url }) => accepted.push(AcceptedFile {
                    original_name: file.original_name.clone(),
                    key: location.key.clone(),
                    public_url,
                }),
                Ok(Verdict::Rejected { reason, detail }) => {
                    warn!(%batch_id, key = %location.key, ?reason, "Batch short-circuited by rejection");
                    self.rollback_except(&entries, index).await;
                    return Ok(UploadOutcome::Rejected(RejectedFile {
                        original_name: file.original_name.clone(),
                        key: location.key.clone(),
                        category,
                        reason,
                        detail,
                    }));
                }
                Err(e) => {
                    error!(%batch_id, key = %location.key, error = %e, "Batch aborted by analysis error");
                    self.rollback_all(&entries).await;
                    return Err(e);
                }
            }
        }

        info!(%batch_id, files = accepted.len(), "Upload batch accepted");
        Ok(UploadOutcome::Accepted(accepted))
    }

    async fn store_all(
        &self,
        entries: &[(UploadedFile, StorageLocation)],
    ) -> Result<(), ApplicationError> {
        let store = self.pipeline.store();
        let results = join_all(
            entries
                .iter()
                .map(|(file, location)| store.put(location, file)),
        )
        .await;

        let mut stored = Vec::new();
        let mut first_error = None;
        for ((_, location), result) in entries.iter().zip(results) {
            match result {
                Ok(()) => stored.push(location),
                Err(e) => {
                    error!(key = %location.key, error = %e, "Failed to store file");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            None => Ok(()),
            Some(e) => {
                join_all(stored.into_iter().map(|l| self.pipeline.rollback(l))).await;
                Err(e)
            }
        }
    }

    async fn rollback_except(&self, entries: &[(UploadedFile, StorageLocation)], skip: usize) {
        join_all(
            entries
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, (_, location))| self.pipeline.rollback(location)),
        )
        .await;
    }

    async fn rollback_all(&self, entries: &[(UploadedFile, StorageLocation)]) {
        join_all(
            entries
                .iter()
                .map(|(_, location)| self.pipeline.rollback(location)),
        )
        .await;
    }
}
