//! Pipeline stages
//!
//! Each stage wraps one provider capability and shapes its outcome into
//! the record returned to clients. Stages never fail: provider failures
//! arrive as fallback values and are reported through `status`/`message`.

use crate::services::prompt_builder::{build_poem_prompt, build_scene_prompt};
use crate::services::{
    GeneratedMusic, ProviderResponse, Status, TextGenerator, TextToImage, TextToMusic,
};
use momo_common::emotion::MusicFeatures;
use momo_common::profile::remembered;
use momo_common::{EmotionLabel, UserProfile};
use serde::Serialize;
use std::sync::Arc;

/// Characters of poem text passed to music generators as a prompt
const MUSIC_PROMPT_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct PoemOutcome {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub poem: String,
    pub prompt: String,
    pub service: &'static str,
}

pub struct PoemStage {
    generator: Arc<dyn TextGenerator>,
}

impl PoemStage {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn service(&self) -> &'static str {
        self.generator.service()
    }

    pub async fn run(&self, profile: &UserProfile, emotion: &EmotionLabel) -> PoemOutcome {
        let prompt = build_poem_prompt(profile, emotion);
        let response = ProviderResponse::attributed(
            self.generator.generate(&prompt).await,
            self.generator.service(),
        );

        PoemOutcome {
            status: response.status,
            message: response.message,
            poem: response.data,
            prompt,
            service: response.service,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MusicRecommendation {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub music_features: MusicFeatures,
    pub recommended_music: GeneratedMusic,
    pub explanation: String,
    pub service: &'static str,
}

pub struct MusicStage {
    music: Arc<dyn TextToMusic>,
    duration_secs: u32,
}

impl MusicStage {
    pub fn new(music: Arc<dyn TextToMusic>, duration_secs: u32) -> Self {
        Self {
            music,
            duration_secs,
        }
    }

    pub fn service(&self) -> &'static str {
        self.music.service()
    }

    pub async fn run(&self, emotion: &EmotionLabel, poem: &str) -> MusicRecommendation {
        let prompt: String = poem.chars().take(MUSIC_PROMPT_CHARS).collect();
        let generated = self
            .music
            .generate(&prompt, emotion, self.duration_secs)
            .await;
        let ProviderResponse {
            status,
            message,
            data: track,
            service,
        } = ProviderResponse::from_result(generated);
        let features = emotion.music_features();

        let explanation = if status.is_success() && service != "library" {
            format!("Generated music that matches your {} emotion", emotion)
        } else {
            format!(
                "Selected music that matches your {} emotion with {} mood.",
                emotion, features.mood
            )
        };

        MusicRecommendation {
            status,
            message,
            music_features: features,
            recommended_music: track,
            service,
            explanation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageResult {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub image_url: String,
    pub image_prompt: String,
    pub description: String,
    pub service: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub struct ImageStage {
    images: Arc<dyn TextToImage>,
}

impl ImageStage {
    pub fn new(images: Arc<dyn TextToImage>) -> Self {
        Self { images }
    }

    pub fn service(&self) -> &'static str {
        self.images.service()
    }

    pub fn is_generative(&self) -> bool {
        self.images.is_generative()
    }

    pub async fn run(&self, profile: &UserProfile, emotion: &EmotionLabel) -> ImageResult {
        let scene = build_scene_prompt(profile);
        let ProviderResponse {
            status,
            message,
            data: image,
            service,
        } = ProviderResponse::from_result(self.images.generate(&scene, emotion).await);
        let place = remembered(&profile.place).unwrap_or("the remembered place");

        let (description, note) = if !status.is_success() {
            (
                format!("Memory scene at {}", place),
                Some("Using fallback image".to_string()),
            )
        } else if self.images.is_generative() {
            (
                format!("Generated image based on the scene at {}", place),
                image.note,
            )
        } else {
            (format!("Memory scene at {}", place), image.note)
        };

        ImageResult {
            status,
            message,
            image_url: image.image_url,
            image_prompt: scene,
            description,
            service,
            note,
        }
    }
}
