//! POST /recommend_music

use axum::{extract::State, routing::post, Json, Router};
use momo_common::EmotionLabel;
use serde::Deserialize;

use super::JsonBody;
use crate::workflow::MusicRecommendation;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MusicRequest {
    pub emotion: Option<EmotionLabel>,
    pub poem: String,
}

pub async fn recommend_music(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<MusicRequest>,
) -> Json<MusicRecommendation> {
    let emotion = request.emotion.unwrap_or_default();
    Json(state.coordinator.music_stage().run(&emotion, &request.poem).await)
}

pub fn music_routes() -> Router<AppState> {
    Router::new().route("/recommend_music", post(recommend_music))
}
