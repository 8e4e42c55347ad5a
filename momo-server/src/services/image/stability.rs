//! Stability AI text-to-image (Stable Diffusion)
//!
//! The API returns the image inline as base64; it is handed on as a
//! `data:` URL so clients can treat every provider's result the same way.

use super::{image_fallback, GeneratedImage, TextToImage};
use crate::services::error::{check_status, ProviderError};
use crate::services::outcome::ProviderResult;
use async_trait::async_trait;
use momo_common::config::ProviderCredentials;
use momo_common::EmotionLabel;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const STABILITY_BASE_URL: &str = "https://api.stability.ai";

const SERVICE: &str = "stability-ai";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    base64: String,
}

pub struct StabilityImages {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl StabilityImages {
    pub fn new(http: reqwest::Client, credentials: &ProviderCredentials, engine: &str) -> Self {
        Self {
            http,
            api_key: credentials.api_key().map(str::to_string),
            endpoint: format!(
                "{}/v1/generation/{}/text-to-image",
                credentials.base_url_or(STABILITY_BASE_URL),
                engine
            ),
        }
    }

    async fn request(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
    ) -> Result<GeneratedImage, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey("Stability AI"))?;
        let enhanced = format!("{}{}", prompt, emotion.image_style_suffix());

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&json!({
                "text_prompts": [{ "text": enhanced, "weight": 1 }],
                "cfg_scale": 7,
                "height": 1024,
                "width": 1024,
                "samples": 1,
                "steps": 30,
            }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body: GenerationResponse = check_status(response).await?.json().await?;
        let artifact = body
            .artifacts
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Parse("response has no artifacts".to_string()))?;

        Ok(GeneratedImage::new(
            SERVICE,
            format!("data:image/png;base64,{}", artifact.base64),
            enhanced,
        ))
    }
}

#[async_trait]
impl TextToImage for StabilityImages {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn generate(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
    ) -> ProviderResult<GeneratedImage> {
        self.request(prompt, emotion)
            .await
            .map_err(|e| image_fallback(SERVICE, emotion, prompt, e))
    }
}
