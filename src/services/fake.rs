//! In-memory provider fakes that record every call, for exercising the
//! pipeline and orchestrator without AWS.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    application::{
        error::ApplicationError,
        moderation_pipeline::ProviderClients,
        services::{ContentModerator, ObjectStore, TextExtractor, ToxicityClassifier},
    },
    domain::models::{
        file::{StorageLocation, UploadedFile},
        moderation::{ModerationLabel, ToxicityResult, VideoJobStatus},
    },
};

#[derive(Default)]
pub struct FakeObjectStore {
    objects: Mutex<HashMap<String, Bytes>>,
    deleted: Mutex<Vec<String>>,
    fail_puts: Mutex<HashSet<String>>,
    fail_deletes: Mutex<HashSet<String>>,
}

impl FakeObjectStore {
    /// Makes `put` fail for this key.
    pub fn fake_fail_put(&self, key: &str) {
        self.fail_puts.lock().unwrap().insert(key.to_string());
    }

    /// Makes `delete` fail for this key.
    pub fn fake_fail_delete(&self, key: &str) {
        self.fail_deletes.lock().unwrap().insert(key.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Keys passed to `delete`, in call order, including failed attempts.
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put(
        &self,
        location: &StorageLocation,
        file: &UploadedFile,
    ) -> Result<(), ApplicationError> {
        if self.fail_puts.lock().unwrap().contains(&location.key) {
            return Err(ApplicationError::StorageFailure(format!(
                "Simulated put failure for {}",
                location.key
            )));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(location.key.clone(), file.content.clone());
        Ok(())
    }

    async fn get(&self, location: &StorageLocation) -> Result<Bytes, ApplicationError> {
        self.objects
            .lock()
            .unwrap()
            .get(&location.key)
            .cloned()
            .ok_or_else(|| ApplicationError::StorageFailure(format!("No object {}", location.key)))
    }

    async fn delete(&self, location: &StorageLocation) -> Result<(), ApplicationError> {
        self.deleted.lock().unwrap().push(location.key.clone());
        if self.fail_deletes.lock().unwrap().contains(&location.key) {
            return Err(ApplicationError::StorageFailure(format!(
                "Simulated delete failure for {}",
                location.key
            )));
        }
        self.objects.lock().unwrap().remove(&location.key);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeModerator {
    image_labels: Mutex<HashMap<String, Vec<ModerationLabel>>>,
    video_statuses: Mutex<VecDeque<VideoJobStatus>>,
    video_labels: Mutex<HashMap<String, Vec<ModerationLabel>>>,
    jobs: Mutex<HashMap<String, String>>,
    fail_image: Mutex<bool>,
    pub image_calls: AtomicUsize,
    pub video_starts: AtomicUsize,
    pub status_polls: AtomicUsize,
}

impl FakeModerator {
    pub fn fake_image_labels(&self, key: &str, labels: Vec<ModerationLabel>) {
        self.image_labels
            .lock()
            .unwrap()
            .insert(key.to_string(), labels);
    }

    /// Labels reported once a video job for `key` succeeds.
    pub fn fake_video_labels(&self, key: &str, labels: Vec<ModerationLabel>) {
        self.video_labels
            .lock()
            .unwrap()
            .insert(key.to_string(), labels);
    }

    /// Statuses returned by successive polls, shared across jobs. When the
    /// queue is empty a job succeeds with its `fake_video_labels`.
    pub fn fake_video_statuses(&self, statuses: Vec<VideoJobStatus>) {
        *self.video_statuses.lock().unwrap() = statuses.into();
    }

    pub fn fake_fail_image(&self) {
        *self.fail_image.lock().unwrap() = true;
    }

    pub fn calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
            + self.video_starts.load(Ordering::SeqCst)
            + self.status_polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentModerator for FakeModerator {
    async fn moderate_image(
        &self,
        location: &StorageLocation,
    ) -> Result<Vec<ModerationLabel>, ApplicationError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_image.lock().unwrap() {
            return Err(ApplicationError::AnalysisFailure(
                "Simulated moderation failure".to_string(),
            ));
        }
        Ok(self
            .image_labels
            .lock()
            .unwrap()
            .get(&location.key)
            .cloned()
            .unwrap_or_default())
    }

    async fn start_video_moderation(
        &self,
        location: &StorageLocation,
    ) -> Result<String, ApplicationError> {
        let n = self.video_starts.fetch_add(1, Ordering::SeqCst);
        let job_id = format!("job-{}", n);
        self.jobs
            .lock()
            .unwrap()
            .insert(job_id.clone(), location.key.clone());
        Ok(job_id)
    }

    async fn video_moderation_status(
        &self,
        job_id: &str,
    ) -> Result<VideoJobStatus, ApplicationError> {
        self.status_polls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.video_statuses.lock().unwrap().pop_front() {
            return Ok(status);
        }
        let key = self
            .jobs
            .lock()
            .unwrap()
            .get(job_id)
            .cloned()
            .ok_or_else(|| ApplicationError::AnalysisFailure(format!("Unknown job {}", job_id)))?;
        Ok(VideoJobStatus::Succeeded(
            self.video_labels
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

#[derive(Default)]
pub struct FakeTextExtractor {
    texts: Mutex<HashMap<String, String>>,
    pub calls: AtomicUsize,
}

impl FakeTextExtractor {
    pub fn fake_text(&self, key: &str, text: &str) {
        self.texts
            .lock()
            .unwrap()
            .insert(key.to_string(), text.to_string());
    }
}

#[async_trait]
impl TextExtractor for FakeTextExtractor {
    async fn extract_text(&self, location: &StorageLocation) -> Result<String, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .texts
            .lock()
            .unwrap()
            .get(&location.key)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeToxicityClassifier {
    scores: Mutex<HashMap<String, f32>>,
    pub calls: AtomicUsize,
}

impl FakeToxicityClassifier {
    /// Score reported for exactly this text; anything else scores 0.
    pub fn fake_score(&self, text: &str, score: f32) {
        self.scores
            .lock()
            .unwrap()
            .insert(text.to_string(), score);
    }

    pub fn detail_for(text: &str, score: f32) -> serde_json::Value {
        serde_json::json!({
            "Labels": [{"Name": "INSULT", "Score": score}],
            "Toxicity": score,
            "Text": text,
        })
    }
}

#[async_trait]
impl ToxicityClassifier for FakeToxicityClassifier {
    async fn classify(&self, text: &str) -> Result<ToxicityResult, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let score = self.scores.lock().unwrap().get(text).copied();
        Ok(match score {
            Some(score) => ToxicityResult {
                toxicity_score: score,
                detail: Self::detail_for(text, score),
            },
            None => ToxicityResult::clean(),
        })
    }
}

/// Bundle of fakes sharing state with the `ProviderClients` they hand out.
#[derive(Clone, Default)]
pub struct FakeProviders {
    pub store: Arc<FakeObjectStore>,
    pub moderator: Arc<FakeModerator>,
    pub extractor: Arc<FakeTextExtractor>,
    pub classifier: Arc<FakeToxicityClassifier>,
}

impl FakeProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> ProviderClients {
        ProviderClients {
            store: self.store.clone(),
            moderator: self.moderator.clone(),
            extractor: self.extractor.clone(),
            classifier: self.classifier.clone(),
        }
    }

    pub fn analysis_calls(&self) -> usize {
        self.moderator.calls()
            + self.extractor.calls.load(Ordering::SeqCst)
            + self.classifier.calls.load(Ordering::SeqCst)
    }
}
