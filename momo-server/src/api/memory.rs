//! POST /generate_complete_memory

use axum::{extract::State, routing::post, Json, Router};
use momo_common::{EmotionLabel, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::JsonBody;
use crate::services::{GeneratedMusic, Status};
use crate::workflow::{GenerationResult, ImageSummary};
use crate::{ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MemoryRequest {
    pub eeg_data: Vec<Value>,
    pub user_data: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct MemoryResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<GeneratedMusic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSummary>,
    /// Number of pipeline steps that ran
    pub processing_steps: usize,
}

impl From<GenerationResult> for MemoryResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            status: result.status,
            error: result.error,
            emotion: result.emotion,
            poem: result.poem,
            music: result.music,
            image: result.image,
            processing_steps: result.steps.len(),
        }
    }
}

pub async fn generate_complete_memory(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<MemoryRequest>,
) -> ApiResult<Json<MemoryResponse>> {
    let result = state
        .coordinator
        .run(&request.eeg_data, &request.user_data)
        .await?;

    info!(
        request_id = %result.request_id,
        status = ?result.status,
        steps = ?result.step_names(),
        "Memory generation finished"
    );
    Ok(Json(result.into()))
}

pub fn memory_routes() -> Router<AppState> {
    Router::new().route("/generate_complete_memory", post(generate_complete_memory))
}
