use async_trait::async_trait;
use aws_sdk_textract::{
    error::DisplayErrorContext,
    types::{Block, BlockType, Document, S3Object},
    Client,
};

use crate::{
    application::{error::ApplicationError, services::TextExtractor},
    domain::models::file::StorageLocation,
    services::error::ProviderError,
};

pub struct TextractExtractor {
    client: Client,
}

impl TextractExtractor {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

/// Joins the text of every LINE block with single spaces.
fn join_lines(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter(|block| block.block_type() == Some(&BlockType::Line))
        .filter_map(|block| block.text())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl TextExtractor for TextractExtractor {
    async fn extract_text(&self, location: &StorageLocation) -> Result<String, ApplicationError> {
        let document = Document::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(&location.bucket)
                    .name(&location.key)
                    .build(),
            )
            .build();

        let response = self
            .client
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(|e| ProviderError::TextExtraction(DisplayErrorContext(e).to_string()))?;

        Ok(join_lines(response.blocks()))
    }
}
