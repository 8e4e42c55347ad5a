//! OpenAI text-to-speech

use super::{Narration, TextToSpeech};
use crate::services::error::{check_status, ProviderError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use momo_common::config::ProviderCredentials;
use momo_common::EmotionLabel;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const SERVICE: &str = "openai-tts";
const MODEL: &str = "tts-1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct OpenAiSpeech {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OpenAiSpeech {
    pub fn new(http: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            http,
            api_key: credentials.api_key().map(str::to_string),
            endpoint: format!("{}/audio/speech", credentials.base_url_or(OPENAI_BASE_URL)),
        }
    }

    async fn request(
        &self,
        text: &str,
        emotion: &EmotionLabel,
    ) -> Result<Narration, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey("OpenAI TTS"))?;
        let settings = emotion.voice_settings();

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&json!({
                "model": MODEL,
                "input": text,
                "voice": settings.voice,
                "speed": settings.speed,
            }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let audio = check_status(response).await?.bytes().await?;
        if audio.is_empty() {
            return Err(ProviderError::NoAudio);
        }
        debug!(
            bytes = audio.len(),
            voice = settings.voice,
            "Narration synthesized"
        );

        Ok(Narration {
            audio_base64: STANDARD.encode(&audio),
            audio_format: "mp3",
            voice: settings.voice,
            emotion: emotion.clone(),
            service: SERVICE,
        })
    }
}

#[async_trait]
impl TextToSpeech for OpenAiSpeech {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn synthesize(
        &self,
        text: &str,
        emotion: &EmotionLabel,
    ) -> Result<Narration, ProviderError> {
        self.request(text, emotion).await.map_err(|e| {
            warn!(service = SERVICE, error = %e, "Speech synthesis failed");
            e
        })
    }
}
