//! Emotion classification from EEG readings
//!
//! No trained model is wired in yet. [`RandomClassifier`] stands in for one
//! and [`FixedClassifier`] gives tests and demos a deterministic answer.

use momo_common::EmotionLabel;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Classifier output; confidence is informational only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub emotion: EmotionLabel,
    pub confidence: f32,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClassificationError {
    #[error("Emotion model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid EEG data: {0}")]
    InvalidInput(String),
}

/// Maps raw EEG samples to an emotion label
pub trait EmotionClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, eeg_data: &[Value]) -> Result<Classification, ClassificationError>;
}

/// Uniform random label with confidence in [0.7, 0.95)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomClassifier;

impl EmotionClassifier for RandomClassifier {
    fn name(&self) -> &'static str {
        "random"
    }

    fn classify(&self, _eeg_data: &[Value]) -> Result<Classification, ClassificationError> {
        let mut rng = rand::thread_rng();
        let emotion = EmotionLabel::RECOGNIZED
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default();

        Ok(Classification {
            emotion,
            confidence: rng.gen_range(0.7..0.95),
        })
    }
}

/// Always returns the same result
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    result: Result<Classification, ClassificationError>,
}

impl FixedClassifier {
    pub fn new(emotion: EmotionLabel) -> Self {
        Self {
            result: Ok(Classification {
                emotion,
                confidence: 1.0,
            }),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            result: Err(ClassificationError::ModelUnavailable(reason.into())),
        }
    }
}

impl EmotionClassifier for FixedClassifier {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn classify(&self, _eeg_data: &[Value]) -> Result<Classification, ClassificationError> {
        self.result.clone()
    }
}
