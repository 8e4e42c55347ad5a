//! OpenAI DALL-E image generation

use super::{image_fallback, GeneratedImage, TextToImage};
use crate::services::error::{check_status, ProviderError};
use crate::services::outcome::ProviderResult;
use async_trait::async_trait;
use momo_common::config::{DalleSettings, ProviderCredentials};
use momo_common::EmotionLabel;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const SERVICE: &str = "dall-e";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

/// Photographic framing plus emotion-specific lighting
pub(crate) fn enhance_for_photorealism(prompt: &str, emotion: &EmotionLabel) -> String {
    format!(
        "A highly detailed photorealistic photograph, {}, {}, high resolution, professional \
         photography, 50mm lens, shallow depth of field, captured with DSLR camera",
        prompt,
        emotion.image_lighting()
    )
}

pub struct DalleImages {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    settings: DalleSettings,
}

impl DalleImages {
    pub fn new(
        http: reqwest::Client,
        credentials: &ProviderCredentials,
        settings: &DalleSettings,
    ) -> Self {
        Self {
            http,
            api_key: credentials.api_key().map(str::to_string),
            endpoint: format!(
                "{}/images/generations",
                credentials.base_url_or(OPENAI_BASE_URL)
            ),
            settings: settings.clone(),
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
            .ok_or(ProviderError::MissingApiKey("DALL-E"))?;
        let enhanced = enhance_for_photorealism(prompt, emotion);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.settings.model,
                "prompt": enhanced,
                "n": 1,
                "size": self.settings.size,
                "quality": self.settings.quality,
                "style": "natural",
            }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body: ImagesResponse = check_status(response).await?.json().await?;
        let first = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Parse("response has no images".to_string()))?;
        let url = first
            .url
            .ok_or_else(|| ProviderError::Parse("image has no url".to_string()))?;

        let mut image = GeneratedImage::new(SERVICE, url, enhanced);
        image.revised_prompt = first.revised_prompt;
        Ok(image)
    }
}

#[async_trait]
impl TextToImage for DalleImages {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photorealism_enhancement() {
        let enhanced = enhance_for_photorealism("a park", &EmotionLabel::Positive);
        assert_eq!(
            enhanced,
            "A highly detailed photorealistic photograph, a park, warm natural lighting, golden \
             hour, soft shadows, vibrant colors, high resolution, professional photography, 50mm \
             lens, shallow depth of field, captured with DSLR camera"
        );
    }
}
