//! Memory generation pipeline
//!
//! `start -> emotion_classified -> poem_generated -> music_selected ->
//! image_generated -> done`, with one early exit when classification fails.

pub mod coordinator;
pub mod stages;

pub use coordinator::Coordinator;
pub use stages::{ImageResult, ImageStage, MusicRecommendation, MusicStage, PoemOutcome, PoemStage};

use crate::services::{GeneratedMusic, Status};
use momo_common::EmotionLabel;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub const STEP_EMOTION: &str = "emotion_analysis";
pub const STEP_POEM: &str = "poem_generation";
pub const STEP_MUSIC: &str = "music_recommendation";
pub const STEP_IMAGE: &str = "image_generation";

/// Message reported when classification ends the run early
pub const EMOTION_FAILED: &str = "Emotion analysis failed";

/// Internal pipeline failure; provider failures never end up here
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to record {step} result: {source}")]
    Trace {
        step: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One entry of the step trace
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: &'static str,
    pub result: Value,
}

/// Image fields surfaced in the aggregate response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSummary {
    pub url: String,
    pub description: String,
    pub prompt: String,
}

/// Aggregate of one pipeline run; never mutated after it is returned
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub request_id: Uuid,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<GeneratedMusic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSummary>,
    pub steps: Vec<StepRecord>,
}

impl GenerationResult {
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step).collect()
    }
}
