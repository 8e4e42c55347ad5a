//! Text-to-image adapters
//!
//! Providers differ in how results come back: a hosted URL (DALL-E), an
//! inline base64 artifact (Stability), an asynchronous prediction
//! (Replicate SDXL) or a keyword URL built locally (Unsplash). All of them
//! normalize to [`GeneratedImage`]. On failure the fallback value is a
//! placeholder URL built from emotion keywords.

mod dalle;
mod sdxl;
mod stability;
mod unsplash;

pub use dalle::DalleImages;
pub use sdxl::SdxlImages;
pub use stability::StabilityImages;
pub use unsplash::UnsplashImages;

use super::error::ProviderError;
use super::outcome::{Attributed, Fallback, ProviderResult};
use async_trait::async_trait;
use momo_common::config::MomoConfig;
use momo_common::EmotionLabel;
use serde::Serialize;
use tracing::warn;

pub const PLACEHOLDER_BASE_URL: &str = "https://source.unsplash.com/1024x1024/";

/// Placeholder substituted after a failed generation
pub fn fallback_image_url(emotion: &EmotionLabel) -> String {
    let keywords = emotion.fallback_image_keywords();
    format!("{}?{}", PLACEHOLDER_BASE_URL, keywords)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedImage {
    pub image_url: String,
    /// Prompt as sent to the provider
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip)]
    pub service: &'static str,
}

impl GeneratedImage {
    pub fn new(service: &'static str, image_url: String, prompt: String) -> Self {
        Self {
            image_url,
            prompt,
            revised_prompt: None,
            keywords: None,
            note: None,
            service,
        }
    }

    fn placeholder(service: &'static str, emotion: &EmotionLabel, prompt: &str) -> Self {
        Self::new(service, fallback_image_url(emotion), prompt.to_string())
    }
}

impl Attributed for GeneratedImage {
    fn service(&self) -> &'static str {
        self.service
    }
}

/// Wrap a provider error into the placeholder fallback
pub(crate) fn image_fallback(
    service: &'static str,
    emotion: &EmotionLabel,
    prompt: &str,
    error: ProviderError,
) -> Fallback<GeneratedImage> {
    warn!(service, error = %error, "Image generation failed, using placeholder");
    Fallback::new(GeneratedImage::placeholder(service, emotion, prompt), error)
}

#[async_trait]
pub trait TextToImage: Send + Sync {
    fn service(&self) -> &'static str;

    /// True when the provider calls a generative model (not a placeholder)
    fn is_generative(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
    ) -> ProviderResult<GeneratedImage>;
}

/// Image providers selectable by `services.image`
pub enum ImageProvider {
    Dalle(DalleImages),
    Stability(StabilityImages),
    Replicate(SdxlImages),
    Unsplash(UnsplashImages),
}

impl ImageProvider {
    /// Provider for `name`; unknown names select the keyless placeholder
    pub fn by_name(name: &str, config: &MomoConfig, http: reqwest::Client) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dalle" | "dall-e" => {
                ImageProvider::Dalle(DalleImages::new(http, &config.openai, &config.dalle))
            }
            "stability" => ImageProvider::Stability(StabilityImages::new(
                http,
                &config.stability,
                &config.stability_engine,
            )),
            "replicate" => ImageProvider::Replicate(SdxlImages::new(http, &config.replicate)),
            "unsplash" => ImageProvider::Unsplash(UnsplashImages),
            other => {
                warn!("Unknown image service '{other}', using unsplash placeholders");
                ImageProvider::Unsplash(UnsplashImages)
            }
        }
    }

    pub fn from_config(config: &MomoConfig, http: reqwest::Client) -> Self {
        Self::by_name(&config.services.image, config, http)
    }

    fn inner(&self) -> &dyn TextToImage {
        match self {
            ImageProvider::Dalle(p) => p,
            ImageProvider::Stability(p) => p,
            ImageProvider::Replicate(p) => p,
            ImageProvider::Unsplash(p) => p,
        }
    }
}

#[async_trait]
impl TextToImage for ImageProvider {
    fn service(&self) -> &'static str {
        self.inner().service()
    }

    fn is_generative(&self) -> bool {
        self.inner().is_generative()
    }

    async fn generate(
        &self,
        prompt: &str,
        emotion: &EmotionLabel,
    ) -> ProviderResult<GeneratedImage> {
        self.inner().generate(prompt, emotion).await
    }
}
