#[derive(Debug)]
pub enum ApplicationError {
    BadRequest(String),
    PayloadTooLarge,
    /// A moderation provider failed or returned something unusable.
    /// Never evidence of a content violation.
    AnalysisFailure(String),
    StorageFailure(String),
    InternalError(String),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ApplicationError::PayloadTooLarge => write!(f, "payload too large"),
            ApplicationError::AnalysisFailure(msg) => write!(f, "analysis failure: {}", msg),
            ApplicationError::StorageFailure(msg) => write!(f, "storage failure: {}", msg),
            ApplicationError::InternalError(msg) => write!(f, "internal error: {}", msg),
        }
    }
}
