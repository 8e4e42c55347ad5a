//! Stability AI Stable Audio music generation

use super::{music_fallback, GeneratedMusic, TextToMusic};
use crate::services::error::{check_status, ProviderError};
use crate::services::outcome::ProviderResult;
use async_trait::async_trait;
use momo_common::config::ProviderCredentials;
use momo_common::EmotionLabel;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const STABLE_AUDIO_BASE_URL: &str = "https://api.stability.ai";

const SERVICE: &str = "stable-audio";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
/// Longest clip the service will render
pub const MAX_DURATION_SECS: u32 = 47;

#[derive(Debug, Deserialize)]
struct AudioResponse {
    audio: Option<String>,
    url: Option<String>,
}

pub(crate) fn full_prompt(emotion: &EmotionLabel) -> String {
    format!(
        "{}, instrumental, no vocals, suitable for memory reflection",
        emotion.music_style()
    )
}

pub struct StableAudio {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl StableAudio {
    pub fn new(http: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            http,
            api_key: credentials.api_key().map(str::to_string),
            endpoint: format!(
                "{}/v2beta/stable-audio/generate/music",
                credentials.base_url_or(STABLE_AUDIO_BASE_URL)
            ),
        }
    }

    async fn request(
        &self,
        emotion: &EmotionLabel,
        duration_secs: u32,
    ) -> Result<GeneratedMusic, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey("Stable Audio"))?;
        let prompt = full_prompt(emotion);
        let duration = duration_secs.min(MAX_DURATION_SECS);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&json!({
                "prompt": prompt,
                "duration": duration,
                "output_format": "mp3",
            }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body: AudioResponse = check_status(response).await?.json().await?;
        let url = match (body.audio, body.url) {
            (Some(audio), _) => format!("data:audio/mp3;base64,{}", audio),
            (None, Some(url)) => url,
            (None, None) => return Err(ProviderError::NoAudio),
        };

        Ok(GeneratedMusic::generated(SERVICE, emotion, url, prompt, duration))
    }
}

#[async_trait]
impl TextToMusic for StableAudio {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn generate(
        &self,
        _prompt: &str,
        emotion: &EmotionLabel,
        duration_secs: u32,
    ) -> ProviderResult<GeneratedMusic> {
        self.request(emotion, duration_secs)
            .await
            .map_err(|e| music_fallback(SERVICE, emotion, e))
    }
}
