//! Runs the pipeline stages in order and assembles the result

use super::stages::{ImageStage, MusicStage, PoemStage};
use super::{
    GenerationResult, ImageSummary, StepRecord, WorkflowError, EMOTION_FAILED, STEP_EMOTION,
    STEP_IMAGE, STEP_MUSIC, STEP_POEM,
};
use crate::services::{
    DeepSeekPoet, EmotionClassifier, ImageProvider, MusicProvider, RandomClassifier, Status,
};
use momo_common::config::MomoConfig;
use momo_common::{EmotionLabel, UserProfile};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Serialize)]
struct EmotionStep<'a> {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<&'a EmotionLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

fn record<T: Serialize>(
    steps: &mut Vec<StepRecord>,
    step: &'static str,
    result: &T,
) -> Result<(), WorkflowError> {
    let result =
        serde_json::to_value(result).map_err(|source| WorkflowError::Trace { step, source })?;
    steps.push(StepRecord { step, result });
    Ok(())
}

pub struct Coordinator {
    classifier: Arc<dyn EmotionClassifier>,
    poem: PoemStage,
    music: MusicStage,
    image: ImageStage,
}

impl Coordinator {
    pub fn new(
        classifier: Arc<dyn EmotionClassifier>,
        poem: PoemStage,
        music: MusicStage,
        image: ImageStage,
    ) -> Self {
        Self {
            classifier,
            poem,
            music,
            image,
        }
    }

    /// Production wiring: random classifier plus the configured providers
    pub fn from_config(config: &MomoConfig, http: reqwest::Client) -> Self {
        Self::new(
            Arc::new(RandomClassifier),
            PoemStage::new(Arc::new(DeepSeekPoet::new(http.clone(), &config.deepseek))),
            MusicStage::new(
                Arc::new(MusicProvider::from_config(config, http.clone())),
                config.music_duration_secs,
            ),
            ImageStage::new(Arc::new(ImageProvider::from_config(config, http))),
        )
    }

    pub fn classifier(&self) -> &dyn EmotionClassifier {
        self.classifier.as_ref()
    }

    pub fn poem_stage(&self) -> &PoemStage {
        &self.poem
    }

    pub fn music_stage(&self) -> &MusicStage {
        &self.music
    }

    pub fn image_stage(&self) -> &ImageStage {
        &self.image
    }

    /// Run the full pipeline for one request
    ///
    /// Music and image generation do not depend on each other, so they run
    /// concurrently; the trace still lists music before image.
    pub async fn run(
        &self,
        eeg_data: &[Value],
        profile: &UserProfile,
    ) -> Result<GenerationResult, WorkflowError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("memory", %request_id);
        self.run_inner(request_id, eeg_data, profile)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        request_id: Uuid,
        eeg_data: &[Value],
        profile: &UserProfile,
    ) -> Result<GenerationResult, WorkflowError> {
        let mut steps = Vec::new();

        info!("Step 1: emotion analysis");
        let classification = match self.classifier.classify(eeg_data) {
            Ok(classification) => classification,
            Err(e) => {
                warn!(error = %e, "Emotion analysis failed, aborting pipeline");
                record(
                    &mut steps,
                    STEP_EMOTION,
                    &EmotionStep {
                        status: Status::Error,
                        emotion: None,
                        confidence: None,
                        message: Some(e.to_string()),
                    },
                )?;
                return Ok(GenerationResult {
                    request_id,
                    status: Status::Error,
                    error: Some(EMOTION_FAILED.to_string()),
                    emotion: None,
                    poem: None,
                    music: None,
                    image: None,
                    steps,
                });
            }
        };
        let emotion = classification.emotion;
        record(
            &mut steps,
            STEP_EMOTION,
            &EmotionStep {
                status: Status::Success,
                emotion: Some(&emotion),
                confidence: Some(classification.confidence),
                message: None,
            },
        )?;

        info!(emotion = %emotion, "Step 2: poem generation");
        let poem = self.poem.run(profile, &emotion).await;
        record(&mut steps, STEP_POEM, &poem)?;

        info!("Steps 3-4: music recommendation and image generation");
        let (music, image) = tokio::join!(
            self.music.run(&emotion, &poem.poem),
            self.image.run(profile, &emotion)
        );
        record(&mut steps, STEP_MUSIC, &music)?;
        record(&mut steps, STEP_IMAGE, &image)?;

        info!(
            emotion = %emotion,
            poem_status = ?poem.status,
            music_service = music.service,
            image_service = image.service,
            "Memory generation completed"
        );

        Ok(GenerationResult {
            request_id,
            status: Status::Success,
            error: None,
            emotion: Some(emotion),
            poem: Some(poem.poem),
            music: Some(music.recommended_music),
            image: Some(ImageSummary {
                url: image.image_url,
                description: image.description,
                prompt: image.image_prompt,
            }),
            steps,
        })
    }
}
