//! Narration and background music mixing
//!
//! [`AudioMixer::mix`] lays an emotion-specific background bed under a
//! narration clip and returns a single MP3. When server-side mixing is
//! disabled, not compiled in, or fails for any reason, it returns a
//! [`MixResult::WebAudio`] plan telling the browser how to mix the two
//! tracks itself. Mixing never produces an error for the caller.

pub mod background;
pub mod error;
pub mod overlay;

#[cfg(feature = "server-mix")]
pub mod decoder;
#[cfg(feature = "server-mix")]
pub mod encoder;
#[cfg(feature = "server-mix")]
pub mod resampler;

pub use error::{MixError, Result};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use momo_common::config::MomoConfig;
use momo_common::{EmotionLabel, FadeCurve};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Browser-side background volume relative to narration
pub const CLIENT_BACKGROUND_VOLUME: f64 = 0.3;
pub const CLIENT_NARRATION_VOLUME: f64 = 1.0;

const UNAVAILABLE_NOTE: &str =
    "Server-side mixing unavailable, mix on the client using Web Audio API";
const FAILED_NOTE: &str = "Server-side mixing failed, mix on the client using Web Audio API";

/// Narration with the background already mixed in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedAudio {
    pub status: &'static str,
    pub audio_base64: String,
    pub audio_format: &'static str,
    pub mixed: bool,
    pub emotion: EmotionLabel,
}

/// Instructions for mixing in the browser
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientMixPlan {
    pub status: &'static str,
    pub narration_base64: String,
    pub background_music_url: String,
    pub background_volume: f64,
    pub narration_volume: f64,
    pub mixed: bool,
    pub emotion: EmotionLabel,
    pub note: String,
}

/// Outcome of a mix request, tagged by `method`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MixResult {
    ServerSide(MergedAudio),
    WebAudio(ClientMixPlan),
}

impl MixResult {
    pub fn is_mixed(&self) -> bool {
        matches!(self, MixResult::ServerSide(_))
    }
}

/// Mixes narration with per-emotion background beds
#[derive(Debug, Clone)]
pub struct AudioMixer {
    background_dir: PathBuf,
    http: reqwest::Client,
    server_side: bool,
    fade_curve: FadeCurve,
}

impl AudioMixer {
    pub fn new(background_dir: impl Into<PathBuf>, http: reqwest::Client) -> Self {
        Self {
            background_dir: background_dir.into(),
            http,
            server_side: true,
            fade_curve: FadeCurve::default(),
        }
    }

    /// Mixer reading beds from `<static_dir>/audio/background`
    pub fn from_config(config: &MomoConfig, http: reqwest::Client) -> Self {
        Self::new(config.static_dir.join("audio").join("background"), http)
            .with_server_side(config.mixing.server_side)
            .with_fade_curve(config.mixing.fade_curve)
    }

    pub fn with_server_side(mut self, enabled: bool) -> Self {
        self.server_side = enabled;
        self
    }

    pub fn with_fade_curve(mut self, curve: FadeCurve) -> Self {
        self.fade_curve = curve;
        self
    }

    pub fn background_dir(&self) -> &Path {
        &self.background_dir
    }

    /// True when this build can mix and mixing is enabled
    pub fn server_side_available(&self) -> bool {
        self.server_side && cfg!(feature = "server-mix")
    }

    /// Mix base64 narration audio with the bed for `emotion`
    pub async fn mix(&self, narration_base64: &str, emotion: &EmotionLabel) -> MixResult {
        if !self.server_side_available() {
            return self.client_mix_plan(narration_base64, emotion, UNAVAILABLE_NOTE);
        }

        match self.mix_server_side(narration_base64, emotion).await {
            Ok(mp3) => {
                info!(emotion = %emotion, bytes = mp3.len(), "Narration mixed server-side");
                MixResult::ServerSide(MergedAudio {
                    status: "success",
                    audio_base64: STANDARD.encode(mp3),
                    audio_format: "mp3",
                    mixed: true,
                    emotion: emotion.clone(),
                })
            }
            Err(e) => {
                warn!(error = %e, "Server-side mixing failed, returning client mix plan");
                self.client_mix_plan(narration_base64, emotion, FAILED_NOTE)
            }
        }
    }

    /// Plan for mixing in the browser; never touches the audio
    pub fn client_mix_plan(
        &self,
        narration_base64: &str,
        emotion: &EmotionLabel,
        note: &str,
    ) -> MixResult {
        MixResult::WebAudio(ClientMixPlan {
            status: "success",
            narration_base64: narration_base64.to_string(),
            background_music_url: emotion.background_track().fallback_url.to_string(),
            background_volume: CLIENT_BACKGROUND_VOLUME,
            narration_volume: CLIENT_NARRATION_VOLUME,
            mixed: false,
            emotion: emotion.clone(),
            note: note.to_string(),
        })
    }

    #[cfg(feature = "server-mix")]
    async fn mix_server_side(
        &self,
        narration_base64: &str,
        emotion: &EmotionLabel,
    ) -> Result<Vec<u8>> {
        let narration = STANDARD
            .decode(narration_base64.trim())
            .map_err(|e| MixError::InvalidNarration(e.to_string()))?;
        let background = background::load_background(
            &self.background_dir,
            emotion.background_track(),
            &self.http,
        )
        .await?;
        let curve = self.fade_curve;

        tokio::task::spawn_blocking(move || render_mix(narration, background, curve))
            .await
            .map_err(|e| MixError::Task(e.to_string()))?
    }

    #[cfg(not(feature = "server-mix"))]
    async fn mix_server_side(
        &self,
        _narration_base64: &str,
        _emotion: &EmotionLabel,
    ) -> Result<Vec<u8>> {
        Err(MixError::Unavailable)
    }
}

/// Decode, align, overlay, fade and encode. CPU bound.
#[cfg(feature = "server-mix")]
fn render_mix(narration: Vec<u8>, background: Vec<u8>, curve: FadeCurve) -> Result<Vec<u8>> {
    use overlay::{
        apply_fades, attenuate, loop_to_length, BACKGROUND_ATTENUATION_DB, FADE_IN_MS, FADE_OUT_MS,
    };

    let narration = decoder::decode_bytes(narration, "narration")?;
    let background = decoder::decode_bytes(background, "background")?;

    let bed = resampler::resample(
        &background.samples,
        background.sample_rate,
        narration.sample_rate,
        background.channels,
    )?;
    let mut bed = loop_to_length(&bed, narration.samples.len());
    attenuate(&mut bed, BACKGROUND_ATTENUATION_DB);

    let mut mixed = overlay::overlay(&narration.samples, &bed);
    apply_fades(
        &mut mixed,
        narration.sample_rate,
        narration.channels,
        FADE_IN_MS,
        FADE_OUT_MS,
        curve,
    );

    encoder::encode_mp3(&mixed, narration.sample_rate)
}
