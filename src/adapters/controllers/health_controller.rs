use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use sysinfo::System;
use tracing::info;

use crate::domain::{
    config::settings::{PollPolicy, Settings},
    models::moderation::{LABEL_CONFIDENCE_THRESHOLD, TOXICITY_THRESHOLD},
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub bucket: String,
    pub region: String,
    pub moderation: ModerationInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct ModerationInfo {
    #[serde(rename = "labelConfidenceThreshold")]
    pub label_confidence_threshold: f32,
    #[serde(rename = "toxicityThreshold")]
    pub toxicity_threshold: f32,
    #[serde(rename = "videoPoll")]
    pub video_poll: PollPolicy,
    #[serde(rename = "maxUploadBytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

pub struct HealthController;

impl HealthController {
    /// GET /health
    pub async fn health_check(State(settings): State<Arc<Settings>>) -> Json<HealthResponse> {
        info!("Health check requested");

        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            bucket: settings.bucket.clone(),
            region: settings.region.clone(),
            moderation: ModerationInfo {
                label_confidence_threshold: LABEL_CONFIDENCE_THRESHOLD,
                toxicity_threshold: TOXICITY_THRESHOLD,
                video_poll: settings.poll,
                max_upload_bytes: settings.max_upload_bytes,
            },
            metrics: SystemMetrics {
                cpu_usage_percent: sys.global_cpu_usage(),
                memory_used_bytes: memory_used,
                memory_total_bytes: memory_total,
                memory_usage_percent,
            },
        })
    }
}
