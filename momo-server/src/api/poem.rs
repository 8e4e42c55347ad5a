//! POST /generate_poem

use axum::{extract::State, routing::post, Json, Router};
use momo_common::{EmotionLabel, UserProfile};
use serde::{Deserialize, Serialize};

use super::JsonBody;
use crate::AppState;

/// Profile fields sit at the top level next to `emotion`
#[derive(Debug, Default, Deserialize)]
pub struct PoemRequest {
    #[serde(default)]
    pub emotion: Option<EmotionLabel>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct PoemResponse {
    pub status: &'static str,
    pub prompt: String,
    pub poem: String,
}

/// Always reports success; a failed generation returns the apology text
pub async fn generate_poem(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PoemRequest>,
) -> Json<PoemResponse> {
    // A missing emotion gets the generic instruction, like any unrecognized label
    let emotion = request.emotion.unwrap_or_else(|| EmotionLabel::parse(""));
    let stage = state.coordinator.poem_stage();
    let outcome = stage.run(&request.profile, &emotion).await;

    Json(PoemResponse {
        status: "success",
        prompt: outcome.prompt,
        poem: outcome.poem,
    })
}

pub fn poem_routes() -> Router<AppState> {
    Router::new().route("/generate_poem", post(generate_poem))
}
