use serde::Serialize;

use crate::domain::models::moderation::ModerationLabel;

#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub message: String,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct PdfUploadResponse {
    pub message: String,
    pub pdf: String,
}

#[derive(Debug, Serialize)]
pub struct FileUploadResponse {
    pub message: String,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileUrls", skip_serializing_if = "Option::is_none")]
    pub file_urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct MediaUploadResponse {
    pub message: String,
    pub data: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RejectionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<ModerationLabel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
