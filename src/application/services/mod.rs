mod moderation_service;
mod storage_service;

pub use moderation_service::{ContentModerator, TextExtractor, ToxicityClassifier};
pub use storage_service::ObjectStore;
