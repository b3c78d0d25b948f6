use async_trait::async_trait;
use aws_sdk_comprehend::{
    error::DisplayErrorContext,
    types::{LanguageCode, TextSegment, ToxicLabels},
    Client,
};
use serde_json::json;
use tracing::debug;

use crate::{
    application::{error::ApplicationError, services::ToxicityClassifier},
    domain::models::moderation::ToxicityResult,
    services::error::ProviderError,
};

/// Provider limits for a single DetectToxicContent call.
const MAX_SEGMENT_BYTES: usize = 1000;
const MAX_SEGMENTS_PER_CALL: usize = 10;

pub struct ComprehendClassifier {
    client: Client,
}

impl ComprehendClassifier {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

/// Splits `text` into chunks of at most `max_bytes` bytes covering all of it.
/// Cuts at the last whitespace before the limit, falling back to the nearest
/// char boundary when a chunk has no whitespace.
fn split_segments(text: &str, max_bytes: usize) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        if rest.len() <= max_bytes {
            segments.push(rest);
            break;
        }

        let mut end = max_bytes;
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let cut = match rest[..end].rfind(char::is_whitespace) {
            Some(pos) if pos > 0 => pos,
            _ => end,
        };
        // a single char wider than max_bytes still has to make progress
        let cut = if cut == 0 {
            rest.chars().next().map_or(rest.len(), char::len_utf8)
        } else {
            cut
        };

        let (head, tail) = rest.split_at(cut);
        segments.push(head.trim_end());
        rest = tail.trim_start();
    }

    segments
}

fn to_result(labels: &ToxicLabels) -> ToxicityResult {
    let detail = json!({
        "Labels": labels
            .labels()
            .iter()
            .map(|l| json!({
                "Name": l.name().map(|n| n.as_str()),
                "Score": l.score(),
            }))
            .collect::<Vec<_>>(),
        "Toxicity": labels.toxicity(),
    });

    ToxicityResult {
        toxicity_score: labels.toxicity().unwrap_or(0.0),
        detail,
    }
}

#[async_trait]
impl ToxicityClassifier for ComprehendClassifier {
    /// Scores every segment, batching calls at the provider limit, and
    /// reports the most toxic one.
    async fn classify(&self, text: &str) -> Result<ToxicityResult, ApplicationError> {
        let segments = split_segments(text, MAX_SEGMENT_BYTES);
        let mut most_toxic: Option<ToxicityResult> = None;

        for batch in segments.chunks(MAX_SEGMENTS_PER_CALL) {
            let text_segments = batch
                .iter()
                .map(|s| {
                    TextSegment::builder()
                        .text(*s)
                        .build()
                        .map_err(|e| ProviderError::Toxicity(e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let response = self
                .client
                .detect_toxic_content()
                .set_text_segments(Some(text_segments))
                .language_code(LanguageCode::En)
                .send()
                .await
                .map_err(|e| ProviderError::Toxicity(DisplayErrorContext(e).to_string()))?;

            for result in response.result_list().iter().map(to_result) {
                if most_toxic
                    .as_ref()
                    .map_or(true, |m| result.toxicity_score > m.toxicity_score)
                {
                    most_toxic = Some(result);
                }
            }
        }

        debug!(segments = segments.len(), "Toxicity classification complete");
        Ok(most_toxic.unwrap_or_else(ToxicityResult::clean))
    }
}
