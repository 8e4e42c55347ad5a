//! POST /generate_narration
//!
//! Synthesizes the poem as speech, then lays the emotion's background bed
//! under it. The mix step never fails; it may hand back a client-side mix
//! plan instead of merged audio.

use axum::{extract::State, routing::post, Json, Router};
use momo_common::EmotionLabel;
use momo_mixer::MixResult;
use serde::Deserialize;
use tracing::info;

use super::JsonBody;
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NarrationRequest {
    pub poem: String,
    pub emotion: Option<EmotionLabel>,
}

pub async fn generate_narration(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NarrationRequest>,
) -> ApiResult<Json<MixResult>> {
    if request.poem.trim().is_empty() {
        return Err(ApiError::BadRequest("No poem provided".to_string()));
    }
    let emotion = request.emotion.unwrap_or_default();

    let narration = state
        .speech
        .synthesize(&request.poem, &emotion)
        .await
        .map_err(|source| ApiError::Provider {
            service: state.speech.service(),
            source,
        })?;

    let mixed = state.mixer.mix(&narration.audio_base64, &emotion).await;
    info!(
        emotion = %emotion,
        voice = narration.voice,
        mixed = mixed.is_mixed(),
        "Narration ready"
    );
    Ok(Json(mixed))
}

pub fn narration_routes() -> Router<AppState> {
    Router::new().route("/generate_narration", post(generate_narration))
}
