//! SDXL image generation on Replicate

use super::{image_fallback, GeneratedImage, TextToImage};
use crate::services::error::ProviderError;
use crate::services::outcome::ProviderResult;
use crate::services::replicate::{first_url, PollPolicy, ReplicatePredictions};
use async_trait::async_trait;
use momo_common::config::ProviderCredentials;
use momo_common::EmotionLabel;
use serde_json::json;

const SERVICE: &str = "replicate";
const SDXL_VERSION: &str = "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b";
const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, ugly";

pub struct SdxlImages {
    predictions: ReplicatePredictions,
    policy: PollPolicy,
}

impl SdxlImages {
    pub fn new(http: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            predictions: ReplicatePredictions::new(http, credentials),
            policy: PollPolicy::IMAGE,
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn request(&self, prompt: &str) -> Result<GeneratedImage, ProviderError> {
        let input = json!({
            "prompt": prompt,
            "negative_prompt": NEGATIVE_PROMPT,
            "width": 1024,
            "height": 1024,
        });
        let output = self.predictions.run(SDXL_VERSION, input, self.policy).await?;
        let url = first_url(&output)
            .ok_or_else(|| ProviderError::Parse(format!("unexpected output: {}", output)))?;

        Ok(GeneratedImage::new(SERVICE, url, prompt.to_string()))
    }
}

#[async_trait]
impl TextToImage for SdxlImages {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn generate(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
    ) -> ProviderResult<GeneratedImage> {
        self.request(prompt)
            .await
            .map_err(|e| image_fallback(SERVICE, emotion, prompt, e))
    }
}
