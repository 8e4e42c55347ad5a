//! Shared fixtures for momo-server integration tests
//!
//! Stub provider servers bind to an ephemeral localhost port; fakes stand in
//! for the capability traits when no HTTP traffic is wanted.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use momo_common::config::{MomoConfig, ProviderCredentials};
use momo_common::EmotionLabel;
use momo_mixer::AudioMixer;
use momo_server::services::image::UnsplashImages;
use momo_server::services::music::MusicLibrary;
use momo_server::services::{
    EmotionClassifier, Fallback, FixedClassifier, Narration, ProviderError, ProviderResult,
    TextGenerator, TextToSpeech,
};
use momo_server::workflow::{Coordinator, ImageStage, MusicStage, PoemStage};
use momo_server::AppState;
use std::f32::consts::PI;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Serve `router` on 127.0.0.1 and return its base URL
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Credentials pointing at a stub server
pub fn stub_credentials(base_url: &str) -> ProviderCredentials {
    ProviderCredentials {
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url.to_string()),
    }
}

/// Request bodies captured by a stub handler
pub type Captured = Arc<Mutex<Vec<serde_json::Value>>>;

pub fn captured() -> Captured {
    Arc::new(Mutex::new(Vec::new()))
}

/// 16-bit PCM sine tone WAV held in memory
pub fn sine_wav(sample_rate: u32, channels: u16, seconds: f32, freq: f32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        let frames = (sample_rate as f32 * seconds) as usize;
        for i in 0..frames {
            let t = i as f32 / sample_rate as f32;
            let value = ((2.0 * PI * freq * t).sin() * 0.4 * i16::MAX as f32) as i16;
            for _ in 0..channels {
                writer.write_sample(value).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Write a background bed for `emotion` into `dir`
pub fn install_background(dir: &Path, emotion: &EmotionLabel, bytes: &[u8]) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(emotion.background_track().file), bytes).unwrap();
}

/// Text generator that returns a fixed poem or fails, recording prompts
pub struct FakePoet {
    poem: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakePoet {
    pub fn writing(poem: &str) -> Self {
        Self {
            poem: Some(poem.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            poem: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for FakePoet {
    fn service(&self) -> &'static str {
        "fake-poet"
    }

    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.poem {
            Some(poem) => Ok(poem.clone()),
            None => Err(Fallback::new(
                momo_server::services::POEM_APOLOGY.to_string(),
                ProviderError::Api(503, "overloaded".to_string()),
            )),
        }
    }
}

/// Speech synthesizer returning a WAV tone, or failing
pub struct FakeSpeech {
    audio: Option<Vec<u8>>,
}

impl FakeSpeech {
    pub fn speaking(seconds: f32) -> Self {
        Self {
            audio: Some(sine_wav(24_000, 1, seconds, 440.0)),
        }
    }

    pub fn failing() -> Self {
        Self { audio: None }
    }
}

#[async_trait]
impl TextToSpeech for FakeSpeech {
    fn service(&self) -> &'static str {
        "fake-tts"
    }

    async fn synthesize(
        &self,
        _text: &str,
        emotion: &EmotionLabel,
    ) -> Result<Narration, ProviderError> {
        let audio = self
            .audio
            .as_ref()
            .ok_or_else(|| ProviderError::Api(401, "invalid key".to_string()))?;
        Ok(Narration {
            audio_base64: STANDARD.encode(audio),
            audio_format: "wav",
            voice: emotion.voice_settings().voice,
            emotion: emotion.clone(),
            service: "fake-tts",
        })
    }
}

/// Coordinator with keyless adapters only: no network traffic
pub fn offline_coordinator(
    classifier: Arc<dyn EmotionClassifier>,
    poet: Arc<dyn TextGenerator>,
) -> Coordinator {
    Coordinator::new(
        classifier,
        PoemStage::new(poet),
        MusicStage::new(Arc::new(MusicLibrary), 30),
        ImageStage::new(Arc::new(UnsplashImages)),
    )
}

/// Application state for router tests
///
/// Background beds are read from `<static_dir>/audio/background`.
pub fn test_state(static_dir: &Path, emotion: EmotionLabel, speech: FakeSpeech) -> AppState {
    let config = MomoConfig {
        static_dir: static_dir.to_path_buf(),
        ..MomoConfig::default()
    };
    let coordinator = offline_coordinator(
        Arc::new(FixedClassifier::new(emotion)),
        Arc::new(FakePoet::writing("Light on the water,\nyour hand in mine.")),
    );
    let mixer = AudioMixer::from_config(&config, reqwest::Client::new());
    AppState::new(config, coordinator, Arc::new(speech), mixer)
}
