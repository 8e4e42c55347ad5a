//! Keyword placeholder images from Unsplash; needs no key and makes no
//! request

use super::{GeneratedImage, TextToImage, PLACEHOLDER_BASE_URL};
use crate::services::outcome::ProviderResult;
use async_trait::async_trait;
use momo_common::EmotionLabel;

const SERVICE: &str = "unsplash";
const PLACE_WORDS: &[&str] = &[
    "home", "kitchen", "garden", "park", "beach", "mountain", "room",
];
const MAX_KEYWORD_GROUPS: usize = 4;

/// Emotion keywords, the first place word found in the prompt, then
/// "nostalgia,memory"
pub(crate) fn extract_keywords(prompt: &str, emotion: &EmotionLabel) -> String {
    let lowered = prompt.to_lowercase();
    let mut keywords = vec![emotion.placeholder_keywords()];

    if let Some(place) = PLACE_WORDS.iter().copied().find(|word| lowered.contains(word)) {
        keywords.push(place);
    }
    keywords.extend(["nostalgia", "memory"]);
    keywords.truncate(MAX_KEYWORD_GROUPS);

    keywords.join(",")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnsplashImages;

#[async_trait]
impl TextToImage for UnsplashImages {
    fn service(&self) -> &'static str {
        SERVICE
    }

    fn is_generative(&self) -> bool {
        false
    }

    async fn generate(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
    ) -> ProviderResult<GeneratedImage> {
        let keywords = extract_keywords(prompt, emotion);
        let mut image = GeneratedImage::new(
            SERVICE,
            format!("{}?{}", PLACEHOLDER_BASE_URL, keywords),
            prompt.to_string(),
        );
        image.keywords = Some(keywords);
        image.note =
            Some("Using Unsplash placeholder. Configure AI service for custom images.".to_string());
        Ok(image)
    }
}
