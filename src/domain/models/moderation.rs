use serde::Serialize;

/// Labels at or below this confidence (0-100) are not violations.
pub const LABEL_CONFIDENCE_THRESHOLD: f32 = 90.0;

/// Toxicity scores (0-1) strictly above this value are rejected.
pub const TOXICITY_THRESHOLD: f32 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationLabel {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Confidence")]
    pub confidence: f32,
    #[serde(rename = "ParentName", skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
}

impl ModerationLabel {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
            parent_name: None,
        }
    }

    pub fn is_violation(&self) -> bool {
        self.confidence > LABEL_CONFIDENCE_THRESHOLD
    }
}

/// Keeps only the labels that count as violations.
pub fn actionable_labels(labels: Vec<ModerationLabel>) -> Vec<ModerationLabel> {
    labels.into_iter().filter(|l| l.is_violation()).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToxicityResult {
    pub toxicity_score: f32,
    /// Raw classifier payload, returned to the caller on rejection.
    pub detail: serde_json::Value,
}

impl ToxicityResult {
    pub fn clean() -> Self {
        Self {
            toxicity_score: 0.0,
            detail: serde_json::Value::Null,
        }
    }

    pub fn is_toxic(&self) -> bool {
        self.toxicity_score > TOXICITY_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    ContentViolation,
    ToxicContent,
    NegativeSentiment,
    UnsupportedType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RejectionDetail {
    None,
    Labels(Vec<ModerationLabel>),
    Classifier(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted {
        public_url: String,
    },
    Rejected {
        reason: RejectionReason,
        detail: RejectionDetail,
    },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Terminal state of a video moderation job after bounded polling.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoJobOutcome {
    Succeeded(Vec<ModerationLabel>),
    Failed(String),
    TimedOut { attempts: u32 },
}

/// One observation of a running video moderation job.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoJobStatus {
    InProgress,
    Succeeded(Vec<ModerationLabel>),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_labels_above_ninety_are_violations() {
        let labels = vec![
            ModerationLabel::new("Violence", 90.0),
            ModerationLabel::new("Explicit Nudity", 90.01),
            ModerationLabel::new("Drugs", 12.5),
        ];

        let kept = actionable_labels(labels);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Explicit Nudity");
    }

    #[test]
    fn toxicity_threshold_is_strict() {
        let at = ToxicityResult {
            toxicity_score: 0.75,
            detail: serde_json::Value::Null,
        };
        let above = ToxicityResult {
            toxicity_score: 0.751,
            detail: serde_json::Value::Null,
        };
        assert!(!at.is_toxic());
        assert!(above.is_toxic());
        assert!(!ToxicityResult::clean().is_toxic());
    }

    #[test]
    fn label_serializes_with_provider_field_names() {
        let value = serde_json::to_value(ModerationLabel::new("Violence", 97.5)).unwrap();
        assert_eq!(value, serde_json::json!({"Name": "Violence", "Confidence": 97.5}));
    }
}
