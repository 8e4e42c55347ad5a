//! POST /generate_image

use axum::{extract::State, routing::post, Json, Router};
use momo_common::{EmotionLabel, UserProfile};
use serde::Deserialize;

use super::JsonBody;
use crate::workflow::ImageResult;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImageRequest {
    pub emotion: Option<EmotionLabel>,
    pub user_data: UserProfile,
}

pub async fn generate_image(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ImageRequest>,
) -> Json<ImageResult> {
    let emotion = request.emotion.unwrap_or_default();
    Json(state.coordinator.image_stage().run(&request.user_data, &emotion).await)
}

pub fn image_routes() -> Router<AppState> {
    Router::new().route("/generate_image", post(generate_image))
}
