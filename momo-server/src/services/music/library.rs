//! Curated per-emotion tracks; never fails

use super::{GeneratedMusic, TextToMusic};
use crate::services::outcome::ProviderResult;
use async_trait::async_trait;
use momo_common::EmotionLabel;
use rand::seq::SliceRandom;

const SERVICE: &str = "library";

/// Random curated track for the emotion
pub(crate) fn pick(emotion: &EmotionLabel) -> GeneratedMusic {
    let library = emotion.music_library();
    let track = library
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_else(|| library[0]);

    GeneratedMusic {
        title: track.title.to_string(),
        url: track.url.to_string(),
        description: track.description.to_string(),
        duration: None,
        note: Some("Using pre-selected music. Configure API for custom generation.".to_string()),
        service: SERVICE,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MusicLibrary;

#[async_trait]
impl TextToMusic for MusicLibrary {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn generate(
        &self,
        _prompt: &str,
        emotion: &EmotionLabel,
        _duration_secs: u32,
    ) -> ProviderResult<GeneratedMusic> {
        Ok(pick(emotion))
    }
}
