use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::{
    adapters::{
        dto::upload_dto::{
            FileUploadResponse, ImageUploadResponse, MediaUploadResponse, PdfUploadResponse,
            RejectionResponse,
        },
        multipart::UploadForm,
        state::AppState,
    },
    application::{
        error::ApplicationError,
        upload_orchestrator::{AcceptedFile, CategoryPolicy, RejectedFile, UploadOutcome},
    },
    domain::models::{
        file::MimeCategory,
        moderation::{RejectionDetail, RejectionReason},
    },
};

/// Call-site variants sharing one orchestrator; each differs only in form
/// field, category policy and wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadRoute {
    Image,
    Pdf,
    Multiple,
    Video,
    Universal,
}

impl UploadRoute {
    fn file_field(self) -> &'static str {
        match self {
            UploadRoute::Image => "image",
            UploadRoute::Pdf | UploadRoute::Multiple | UploadRoute::Universal => "file",
            UploadRoute::Video => "media",
        }
    }

    fn accepts_many(self) -> bool {
        matches!(self, UploadRoute::Multiple | UploadRoute::Video)
    }

    fn policy(self) -> CategoryPolicy {
        match self {
            UploadRoute::Image => CategoryPolicy::Expect(MimeCategory::Image),
            UploadRoute::Pdf => CategoryPolicy::Expect(MimeCategory::Pdf),
            UploadRoute::Video => CategoryPolicy::Expect(MimeCategory::Video),
            UploadRoute::Multiple | UploadRoute::Universal => CategoryPolicy::Detect,
        }
    }

    fn missing_file_message(self) -> &'static str {
        match self {
            UploadRoute::Image => "Please provide an image",
            UploadRoute::Pdf => "Please provide a PDF file",
            UploadRoute::Multiple => "Please provide a file to upload",
            UploadRoute::Video => "Please provide the media to upload",
            UploadRoute::Universal => "Please provide a file",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            UploadRoute::Image => "Image uploaded and passed moderation successfully",
            UploadRoute::Pdf => "PDF uploaded and passed moderation successfully",
            UploadRoute::Video => "Media uploaded and passed moderation successfully",
            UploadRoute::Multiple | UploadRoute::Universal => {
                "File uploaded and passed moderation successfully"
            }
        }
    }

    fn rejection_message(self, rejected: &RejectedFile) -> String {
        match (rejected.reason, self) {
            (RejectionReason::ContentViolation, UploadRoute::Multiple) => {
                let kind = match rejected.category {
                    MimeCategory::Video => "video",
                    _ => "image",
                };
                format!("Content violation detected in {}", kind)
            }
            (RejectionReason::ContentViolation, _) => "Content violation detected".to_string(),
            (RejectionReason::NegativeSentiment, _) => {
                "Negative sentiment detected in content".to_string()
            }
            (RejectionReason::ToxicContent, UploadRoute::Multiple) => {
                "Toxic content detected in PDF and file deleted".to_string()
            }
            (RejectionReason::ToxicContent, _) => {
                "Toxic content detected and file deleted".to_string()
            }
            (RejectionReason::UnsupportedType, _) => "Unsupported file type".to_string(),
        }
    }

    fn rejection_response(self, rejected: RejectedFile) -> Response {
        let error = self.rejection_message(&rejected);
        let (violations, details) = match rejected.detail {
            RejectionDetail::None => (None, None),
            RejectionDetail::Labels(labels) => (Some(labels), None),
            RejectionDetail::Classifier(detail) => (None, Some(detail)),
        };

        let body = RejectionResponse {
            success: (self == UploadRoute::Universal).then_some(false),
            error,
            violations,
            details,
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

fn first_url(files: Vec<AcceptedFile>) -> Result<String, ApplicationError> {
    files
        .into_iter()
        .next()
        .map(|f| f.public_url)
        .ok_or_else(|| ApplicationError::InternalError("No file was accepted".to_string()))
}

pub struct UploadController;

impl UploadController {
    async fn process(
        app_state: &AppState,
        multipart: Multipart,
        route: UploadRoute,
    ) -> Result<UploadOutcome, ApplicationError> {
        let form = UploadForm::parse(multipart, route.file_field()).await?;

        if form.files.is_empty() {
            return Err(ApplicationError::BadRequest(
                route.missing_file_message().to_string(),
            ));
        }
        if !route.accepts_many() && form.files.len() > 1 {
            return Err(ApplicationError::BadRequest(format!(
                "Only one '{}' file may be uploaded",
                route.file_field()
            )));
        }

        info!(?route, files = form.files.len(), key = ?form.key, "Upload received");

        app_state
            .orchestrator
            .upload(form.files, form.key.as_deref(), route.policy())
            .await
    }

    /// POST /upload/image
    pub async fn upload_image(
        State(app_state): State<AppState>,
        multipart: Multipart,
    ) -> Result<Response, ApplicationError> {
        let route = UploadRoute::Image;
        match Self::process(&app_state, multipart, route).await? {
            UploadOutcome::Accepted(files) => Ok(Json(ImageUploadResponse {
                message: route.success_message().to_string(),
                image: first_url(files)?,
            })
            .into_response()),
            UploadOutcome::Rejected(rejected) => Ok(route.rejection_response(rejected)),
        }
    }

    /// POST /upload/pdf
    pub async fn upload_pdf(
        State(app_state): State<AppState>,
        multipart: Multipart,
    ) -> Result<Response, ApplicationError> {
        let route = UploadRoute::Pdf;
        match Self::process(&app_state, multipart, route).await? {
            UploadOutcome::Accepted(files) => Ok(Json(PdfUploadResponse {
                message: route.success_message().to_string(),
                pdf: first_url(files)?,
            })
            .into_response()),
            UploadOutcome::Rejected(rejected) => Ok(route.rejection_response(rejected)),
        }
    }

    /// POST /upload/multiple
    ///
    /// Any mix of images, PDFs and videos. `fileUrl` is the first file's URL,
    /// `fileUrls` lists all of them.
    pub async fn upload_multiple(
        State(app_state): State<AppState>,
        multipart: Multipart,
    ) -> Result<Response, ApplicationError> {
        let route = UploadRoute::Multiple;
        match Self::process(&app_state, multipart, route).await? {
            UploadOutcome::Accepted(files) => {
                let urls: Vec<String> = files.into_iter().map(|f| f.public_url).collect();
                Ok(Json(FileUploadResponse {
                    message: route.success_message().to_string(),
                    file_url: urls.first().cloned().unwrap_or_default(),
                    file_urls: Some(urls),
                })
                .into_response())
            }
            UploadOutcome::Rejected(rejected) => Ok(route.rejection_response(rejected)),
        }
    }

    /// POST /upload/video
    pub async fn upload_video(
        State(app_state): State<AppState>,
        multipart: Multipart,
    ) -> Result<Response, ApplicationError> {
        let route = UploadRoute::Video;
        match Self::process(&app_state, multipart, route).await? {
            UploadOutcome::Accepted(files) => Ok(Json(MediaUploadResponse {
                message: route.success_message().to_string(),
                data: files.into_iter().map(|f| f.public_url).collect(),
            })
            .into_response()),
            UploadOutcome::Rejected(rejected) => Ok(route.rejection_response(rejected)),
        }
    }

    /// POST /upload/uni
    pub async fn upload_universal(
        State(app_state): State<AppState>,
        multipart: Multipart,
    ) -> Result<Response, ApplicationError> {
        let route = UploadRoute::Universal;
        match Self::process(&app_state, multipart, route).await? {
            UploadOutcome::Accepted(files) => Ok(Json(FileUploadResponse {
                message: route.success_message().to_string(),
                file_url: first_url(files)?,
                file_urls: None,
            })
            .into_response()),
            UploadOutcome::Rejected(rejected) => Ok(route.rejection_response(rejected)),
        }
    }
}
