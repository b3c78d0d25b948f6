use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
};
use tracing::warn;

use crate::{application::error::ApplicationError, domain::models::file::UploadedFile};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Files sent under one form field plus the optional `key` folder override.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub files: Vec<UploadedFile>,
    pub key: Option<String>,
}

fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApplicationError::PayloadTooLarge;
    }
    warn!("Invalid multipart data: {}", e);
    ApplicationError::BadRequest(e.body_text())
}

impl UploadForm {
    /// Collects every part named `file_field` as a file, in order. Other
    /// fields besides `key` are ignored.
    pub async fn parse(
        mut multipart: Multipart,
        file_field: &str,
    ) -> Result<Self, ApplicationError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();

            if name == file_field {
                let original_name = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| {
                        ApplicationError::BadRequest(format!(
                            "Field '{}' must contain a file",
                            file_field
                        ))
                    })?;
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string();
                let content = field.bytes().await.map_err(multipart_error)?;

                form.files
                    .push(UploadedFile::new(original_name, mime_type, content));
            } else if name == "key" {
                form.key = Some(field.text().await.map_err(multipart_error)?);
            }
        }

        Ok(form)
    }
}
