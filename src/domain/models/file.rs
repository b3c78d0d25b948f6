use bytes::Bytes;
use serde::Serialize;

/// Folder used when a request carries no `key` field.
pub const DEFAULT_FOLDER: &str = "Worktool";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(original_name: String, mime_type: String, content: impl Into<Bytes>) -> Self {
        Self {
            original_name,
            mime_type,
            content: content.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn category(&self) -> MimeCategory {
        MimeCategory::classify(&self.mime_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MimeCategory {
    Image,
    Video,
    Pdf,
    Unsupported,
}

impl MimeCategory {
    pub fn classify(mime_type: &str) -> Self {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if mime_type.starts_with("image/") {
            MimeCategory::Image
        } else if mime_type.starts_with("video/") {
            MimeCategory::Video
        } else if mime_type == "application/pdf" {
            MimeCategory::Pdf
        } else {
            MimeCategory::Unsupported
        }
    }
}

/// Bucket + key pair addressing a persisted object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub bucket: String,
    pub key: String,
}

impl StorageLocation {
    /// Builds `<folder>/<original_name>`, falling back to `default_folder`
    /// when the caller supplied no folder (or a blank one).
    pub fn for_upload(
        bucket: &str,
        folder: Option<&str>,
        default_folder: &str,
        original_name: &str,
    ) -> Self {
        let folder = folder
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(default_folder);

        Self {
            bucket: bucket.to_string(),
            key: format!("{}/{}", folder, original_name),
        }
    }

    pub fn public_url(&self, public_base: &str) -> String {
        format!("{}{}", public_base, self.key)
    }
}
