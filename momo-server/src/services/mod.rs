//! External service adapters
//!
//! One trait per capability (text, image, music, speech) with a small
//! enum registry per capability selected by configuration string. All
//! adapters share a single `reqwest::Client`; timeouts are set per request
//! and nothing is retried.

pub mod emotion_classifier;
pub mod error;
pub mod image;
pub mod music;
pub mod outcome;
pub mod poem_generator;
pub mod prompt_builder;
pub mod replicate;
pub mod speech;

pub use emotion_classifier::{
    Classification, ClassificationError, EmotionClassifier, FixedClassifier, RandomClassifier,
};
pub use error::ProviderError;
pub use image::{GeneratedImage, ImageProvider, TextToImage};
pub use music::{GeneratedMusic, MusicProvider, TextToMusic};
pub use outcome::{Attributed, Fallback, ProviderResponse, ProviderResult, Status};
pub use poem_generator::{DeepSeekPoet, TextGenerator, POEM_APOLOGY};
pub use speech::{Narration, SpeechProvider, TextToSpeech};

const USER_AGENT: &str = concat!("momo/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by every adapter
pub fn build_http_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}
