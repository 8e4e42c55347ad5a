//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

/// Adapter currently wired into each pipeline stage
#[derive(Debug, Serialize)]
pub struct AgentStatus {
    pub emotion_analysis: &'static str,
    pub poem_generation: &'static str,
    pub music_recommendation: &'static str,
    pub image_generation: &'static str,
}

/// Service names as configured
#[derive(Debug, Serialize)]
pub struct ConfiguredServices {
    pub image: String,
    pub music: String,
    pub tts: String,
}

#[derive(Debug, Serialize)]
pub struct Features {
    pub tts: bool,
    pub photorealistic_images: bool,
    pub server_side_mixing: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub build: BuildInfo,
    pub agents: AgentStatus,
    pub services: ConfiguredServices,
    pub features: Features,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;
    let coordinator = &state.coordinator;
    let selection = &state.config.services;

    Json(HealthResponse {
        status: "healthy",
        module: "momo-server",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
        build: BuildInfo {
            git_hash: env!("GIT_HASH"),
            timestamp: env!("BUILD_TIMESTAMP"),
            profile: env!("BUILD_PROFILE"),
        },
        agents: AgentStatus {
            emotion_analysis: coordinator.classifier().name(),
            poem_generation: coordinator.poem_stage().service(),
            music_recommendation: coordinator.music_stage().service(),
            image_generation: coordinator.image_stage().service(),
        },
        services: ConfiguredServices {
            image: selection.image.clone(),
            music: selection.music.clone(),
            tts: selection.tts.clone(),
        },
        features: Features {
            tts: true,
            photorealistic_images: coordinator.image_stage().is_generative(),
            server_side_mixing: state.mixer.server_side_available(),
        },
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
