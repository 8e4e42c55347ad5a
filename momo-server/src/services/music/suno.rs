//! Suno AI instrumental generation

use super::{music_fallback, GeneratedMusic, TextToMusic};
use crate::services::error::{check_status, ProviderError};
use crate::services::outcome::ProviderResult;
use async_trait::async_trait;
use momo_common::config::ProviderCredentials;
use momo_common::EmotionLabel;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const SUNO_BASE_URL: &str = "https://api.sunoai.com";

const SERVICE: &str = "suno-ai";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    audio_url: Option<String>,
    url: Option<String>,
}

pub struct Suno {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl Suno {
    pub fn new(http: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            http,
            api_key: credentials.api_key().map(str::to_string),
            endpoint: format!("{}/v1/generate", credentials.base_url_or(SUNO_BASE_URL)),
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
            .ok_or(ProviderError::MissingApiKey("Suno"))?;
        let style = emotion.music_style();

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&json!({
                "prompt": style,
                "duration": duration_secs,
                "instrumental": true,
                "style": "ambient",
            }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body: GenerateResponse = check_status(response).await?.json().await?;
        let url = body.audio_url.or(body.url).ok_or(ProviderError::NoAudio)?;

        Ok(GeneratedMusic::generated(SERVICE, emotion, url, style.to_string(), duration_secs))
    }
}

#[async_trait]
impl TextToMusic for Suno {
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
