use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApplicationError::PayloadTooLarge => {
                warn!("File too large");
                (StatusCode::PAYLOAD_TOO_LARGE, "File too large".to_string())
            }
            ApplicationError::AnalysisFailure(ref msg) => {
                error!("Content analysis failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Content analysis failed".to_string(),
                )
            }
            ApplicationError::StorageFailure(ref msg) => {
                error!("Storage operation failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage operation failed".to_string(),
                )
            }
            ApplicationError::InternalError(msg) => {
                error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let response = ApplicationError::BadRequest("Please provide an image".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_failures_are_server_errors() {
        let response =
            ApplicationError::AnalysisFailure("job failed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response =
            ApplicationError::StorageFailure("access denied".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
