use std::{collections::HashMap, ffi::OsString, time::Duration};

use serde::Serialize;
use thiserror::Error;

use crate::domain::models::file::DEFAULT_FOLDER;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

/// Bounded retry policy for the video moderation poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollPolicy {
    #[serde(rename = "intervalSecs", serialize_with = "serialize_secs")]
    pub interval: Duration,
    #[serde(rename = "maxAttempts")]
    pub max_attempts: u32,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bucket: String,
    pub public_base_url: String,
    pub region: String,
    pub credentials: Option<AwsCredentials>,
    pub port: u16,
    pub default_folder: String,
    pub poll: PollPolicy,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Option<Vec<String>>,
}

/// Keeps the entries whose name and value are both valid UTF-8.
fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> HashMap<String, String> {
    vars.into_iter()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&utf8_vars(std::env::vars_os()))
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bucket = get("AWS_BUCKET_NAME").ok_or(ConfigError::Missing("AWS_BUCKET_NAME"))?;
        let public_base_url =
            get("CLOUDFRONT_BASE_URL").ok_or(ConfigError::Missing("CLOUDFRONT_BASE_URL"))?;

        let credentials = match (get("AWS_ACCESS_KEY"), get("AWS_SECRETE_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(AwsCredentials {
                access_key_id,
                secret_access_key,
                session_token: get("AWS_SESSION_TOKEN"),
            }),
            _ => None,
        };

        let poll = PollPolicy {
            interval: Duration::from_secs(parse_or(
                get("VIDEO_POLL_INTERVAL_SECS"),
                "VIDEO_POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?),
            max_attempts: parse_or(
                get("VIDEO_POLL_MAX_ATTEMPTS"),
                "VIDEO_POLL_MAX_ATTEMPTS",
                DEFAULT_POLL_MAX_ATTEMPTS,
            )?,
        };
        if poll.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "VIDEO_POLL_MAX_ATTEMPTS",
                value: "0".to_string(),
            });
        }

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            bucket,
            public_base_url,
            region: get("S3_AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            credentials,
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            default_folder: get("DEFAULT_FOLDER").unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
            poll,
            max_upload_bytes: parse_or(
                get("MAX_UPLOAD_BYTES"),
                "MAX_UPLOAD_BYTES",
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            cors_allowed_origins,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { name, value: v }),
        None => Ok(default),
    }
}
