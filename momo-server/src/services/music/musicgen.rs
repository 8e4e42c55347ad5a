//! Meta MusicGen on Replicate

use super::{music_fallback, GeneratedMusic, TextToMusic};
use crate::services::error::ProviderError;
use crate::services::outcome::ProviderResult;
use crate::services::replicate::{first_url, PollPolicy, ReplicatePredictions};
use async_trait::async_trait;
use momo_common::config::ProviderCredentials;
use momo_common::EmotionLabel;
use serde_json::json;

const SERVICE: &str = "musicgen";
const MUSICGEN_VERSION: &str = "b05b1dff1d8c6dc63d14b0cdb42135378dcb87f6373b0d3d341ede46e59e2b38";

pub struct MusicGen {
    predictions: ReplicatePredictions,
    policy: PollPolicy,
}

impl MusicGen {
    pub fn new(http: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            predictions: ReplicatePredictions::new(http, credentials),
            policy: PollPolicy::MUSIC,
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn request(
        &self,
        emotion: &EmotionLabel,
        duration_secs: u32,
    ) -> Result<GeneratedMusic, ProviderError> {
        let style = emotion.music_style();
        let input = json!({
            "prompt": style,
            "duration": duration_secs,
            "temperature": 1.0,
            "model_version": "stereo-large",
        });
        let output = self
            .predictions
            .run(MUSICGEN_VERSION, input, self.policy)
            .await?;
        let url = first_url(&output).ok_or(ProviderError::NoAudio)?;

        Ok(GeneratedMusic::generated(SERVICE, emotion, url, style.to_string(), duration_secs))
    }
}

#[async_trait]
impl TextToMusic for MusicGen {
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
