//! POST /classify_emotion

use axum::{extract::State, routing::post, Json, Router};
use momo_common::EmotionLabel;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::JsonBody;
use crate::services::Status;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClassifyRequest {
    pub eeg_data: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn classify_emotion(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let response = match state.coordinator.classifier().classify(&request.eeg_data) {
        Ok(classification) => ClassifyResponse {
            status: Status::Success,
            emotion: Some(classification.emotion),
            confidence: Some(classification.confidence),
            message: None,
        },
        Err(e) => {
            warn!(error = %e, "Emotion classification failed");
            ClassifyResponse {
                status: Status::Error,
                emotion: None,
                confidence: None,
                message: Some(e.to_string()),
            }
        }
    };
    Json(response)
}

pub fn emotion_routes() -> Router<AppState> {
    Router::new().route("/classify_emotion", post(classify_emotion))
}
