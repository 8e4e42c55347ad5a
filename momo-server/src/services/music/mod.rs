//! Text-to-music adapters
//!
//! Same shape as the image adapters: each provider normalizes to
//! [`GeneratedMusic`], and a failed generation falls back to a curated
//! library track for the emotion.

mod library;
mod musicgen;
mod smart;
mod stable_audio;
mod suno;

pub use library::MusicLibrary;
pub use musicgen::MusicGen;
pub use smart::SmartMusic;
pub use stable_audio::StableAudio;
pub use suno::Suno;

use super::error::ProviderError;
use super::outcome::{Attributed, Fallback, ProviderResult};
use async_trait::async_trait;
use momo_common::config::MomoConfig;
use momo_common::EmotionLabel;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedMusic {
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip)]
    pub service: &'static str,
}

impl GeneratedMusic {
    /// A generated track titled after the emotion
    pub fn generated(
        service: &'static str,
        emotion: &EmotionLabel,
        url: String,
        description: String,
        duration: u32,
    ) -> Self {
        Self {
            title: format!("{} Memory Music", emotion.capitalized()),
            url,
            description,
            duration: Some(duration),
            note: None,
            service,
        }
    }
}

impl Attributed for GeneratedMusic {
    fn service(&self) -> &'static str {
        self.service
    }
}

/// Wrap a provider error into the library-track fallback
pub(crate) fn music_fallback(
    service: &'static str,
    emotion: &EmotionLabel,
    error: ProviderError,
) -> Fallback<GeneratedMusic> {
    warn!(service, error = %error, "Music generation failed, using library track");
    let mut track = library::pick(emotion);
    track.service = service;
    Fallback::new(track, error)
}

#[async_trait]
pub trait TextToMusic: Send + Sync {
    fn service(&self) -> &'static str;

    async fn generate(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
        duration_secs: u32,
    ) -> ProviderResult<GeneratedMusic>;
}

/// Music providers selectable by `services.music`
pub enum MusicProvider {
    StableAudio(StableAudio),
    MusicGen(MusicGen),
    Suno(Suno),
    Library(MusicLibrary),
    Smart(SmartMusic),
}

impl MusicProvider {
    /// Provider for `name`; unknown names select the curated library
    pub fn by_name(name: &str, config: &MomoConfig, http: reqwest::Client) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "stable-audio" | "stable_audio" => {
                MusicProvider::StableAudio(StableAudio::new(http, &config.stable_audio))
            }
            "musicgen" => MusicProvider::MusicGen(MusicGen::new(http, &config.replicate)),
            "suno" => MusicProvider::Suno(Suno::new(http, &config.suno)),
            "library" => MusicProvider::Library(MusicLibrary),
            "smart" => MusicProvider::Smart(SmartMusic::from_config(config, http)),
            other => {
                warn!("Unknown music service '{}', using music library", other);
                MusicProvider::Library(MusicLibrary)
            }
        }
    }

    pub fn from_config(config: &MomoConfig, http: reqwest::Client) -> Self {
        Self::by_name(&config.services.music, config, http)
    }

    fn inner(&self) -> &dyn TextToMusic {
        match self {
            MusicProvider::StableAudio(p) => p,
            MusicProvider::MusicGen(p) => p,
            MusicProvider::Suno(p) => p,
            MusicProvider::Library(p) => p,
            MusicProvider::Smart(p) => p,
        }
    }
}

#[async_trait]
impl TextToMusic for MusicProvider {
    fn service(&self) -> &'static str {
        self.inner().service()
    }

    async fn generate(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
        duration_secs: u32,
    ) -> ProviderResult<GeneratedMusic> {
        self.inner().generate(prompt, emotion, duration_secs).await
    }
}
