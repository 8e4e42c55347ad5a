//! momo-server library interface
//!
//! Turns a person's remembered details and an emotion reading into a
//! "memory": a poem, a matching image, background music and a narrated
//! recording. Exposes the router and state for integration testing.

pub mod api;
pub mod error;
pub mod logging;
pub mod services;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use momo_common::config::MomoConfig;
use momo_mixer::AudioMixer;
use services::{ProviderError, SpeechProvider, TextToSpeech};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use workflow::Coordinator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<MomoConfig>,
    pub coordinator: Arc<Coordinator>,
    pub speech: Arc<dyn TextToSpeech>,
    pub mixer: Arc<AudioMixer>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: MomoConfig,
        coordinator: Coordinator,
        speech: Arc<dyn TextToSpeech>,
        mixer: AudioMixer,
    ) -> Self {
        Self {
            config: Arc::new(config),
            coordinator: Arc::new(coordinator),
            speech,
            mixer: Arc::new(mixer),
            startup_time: Utc::now(),
        }
    }

    /// Wire every adapter from configuration with one shared HTTP client
    pub fn from_config(config: MomoConfig) -> Result<Self, ProviderError> {
        let http = services::build_http_client()?;
        let coordinator = Coordinator::from_config(&config, http.clone());
        let speech = Arc::new(SpeechProvider::from_config(&config, http.clone()));
        let mixer = AudioMixer::from_config(&config, http);
        Ok(Self::new(config, coordinator, speech, mixer))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(api::ui_routes())
        .merge(api::emotion_routes())
        .merge(api::poem_routes())
        .merge(api::memory_routes())
        .merge(api::music_routes())
        .merge(api::image_routes())
        .merge(api::narration_routes())
        .merge(api::health_routes())
        .nest_service("/static", static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
