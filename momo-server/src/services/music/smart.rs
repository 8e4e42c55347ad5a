//! Tries every credentialed generator in priority order, then the library

use super::{library, GeneratedMusic, MusicGen, MusicProvider, StableAudio, Suno, TextToMusic};
use crate::services::outcome::ProviderResult;
use async_trait::async_trait;
use momo_common::config::MomoConfig;
use momo_common::EmotionLabel;
use tracing::{debug, info};

pub struct SmartMusic {
    chain: Vec<MusicProvider>,
}

impl SmartMusic {
    pub fn new(chain: Vec<MusicProvider>) -> Self {
        Self { chain }
    }

    /// stable-audio, musicgen, suno; only providers with a key are tried
    pub fn from_config(config: &MomoConfig, http: reqwest::Client) -> Self {
        let mut chain = Vec::new();
        if config.stable_audio.has_key() {
            let stable_audio = StableAudio::new(http.clone(), &config.stable_audio);
            chain.push(MusicProvider::StableAudio(stable_audio));
        }
        if config.replicate.has_key() {
            chain.push(MusicProvider::MusicGen(MusicGen::new(http.clone(), &config.replicate)));
        }
        if config.suno.has_key() {
            chain.push(MusicProvider::Suno(Suno::new(http, &config.suno)));
        }
        Self::new(chain)
    }

    pub fn chain_services(&self) -> Vec<&'static str> {
        self.chain.iter().map(|p| p.service()).collect()
    }
}

#[async_trait]
impl TextToMusic for SmartMusic {
    fn service(&self) -> &'static str {
        "smart"
    }

    async fn generate(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
        duration_secs: u32,
    ) -> ProviderResult<GeneratedMusic> {
        for provider in &self.chain {
            match provider.generate(prompt, emotion, duration_secs).await {
                Ok(music) => {
                    info!(
                        service = provider.service(),
                        "Smart music selection succeeded"
                    );
                    return Ok(music);
                }
                Err(fallback) => {
                    debug!(
                        service = provider.service(),
                        reason = %fallback.message,
                        "Trying next music service"
                    );
                }
            }
        }
        Ok(library::pick(emotion))
    }
}
