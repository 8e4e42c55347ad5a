//! Text-to-speech adapters
//!
//! Unlike the other capabilities, speech has no fallback value: a failed
//! synthesis is returned as a [`ProviderError`].

mod openai;

pub use openai::OpenAiSpeech;

use super::error::ProviderError;
use async_trait::async_trait;
use momo_common::config::MomoConfig;
use momo_common::EmotionLabel;
use serde::Serialize;
use tracing::warn;

/// Synthesized narration, base64 encoded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narration {
    pub audio_base64: String,
    pub audio_format: &'static str,
    pub voice: &'static str,
    pub emotion: EmotionLabel,
    pub service: &'static str,
}

#[async_trait]
pub trait TextToSpeech: Send + Sync {
    fn service(&self) -> &'static str;

    async fn synthesize(
        &self,
        text: &str,
        emotion: &EmotionLabel,
    ) -> Result<Narration, ProviderError>;
}

/// Speech providers selectable by `services.tts`
pub enum SpeechProvider {
    OpenAi(OpenAiSpeech),
}

impl SpeechProvider {
    pub fn by_name(name: &str, config: &MomoConfig, http: reqwest::Client) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => {}
            other => warn!("Unsupported TTS service '{}', using openai", other),
        }
        SpeechProvider::OpenAi(OpenAiSpeech::new(http, &config.openai))
    }

    pub fn from_config(config: &MomoConfig, http: reqwest::Client) -> Self {
        Self::by_name(&config.services.tts, config, http)
    }
}

#[async_trait]
impl TextToSpeech for SpeechProvider {
    fn service(&self) -> &'static str {
        match self {
            SpeechProvider::OpenAi(p) => p.service(),
        }
    }

    async fn synthesize(
        &self,
        text: &str,
        emotion: &EmotionLabel,
    ) -> Result<Narration, ProviderError> {
        match self {
            SpeechProvider::OpenAi(p) => p.synthesize(text, emotion).await,
        }
    }
}
