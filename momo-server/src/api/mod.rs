//! HTTP API handlers
//!
//! JSON in, JSON out. Missing request fields take their defaults. An absent
//! emotion is treated as neutral, except by `/generate_poem`, which treats
//! it as unrecognized. Malformed bodies are answered with the
//! [`ApiError`] envelope.

pub mod emotion;
pub mod health;
pub mod image;
pub mod memory;
pub mod music;
pub mod narration;
pub mod poem;
pub mod ui;

pub use emotion::emotion_routes;
pub use health::health_routes;
pub use image::image_routes;
pub use memory::memory_routes;
pub use music::music_routes;
pub use narration::narration_routes;
pub use poem::poem_routes;
pub use ui::ui_routes;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::ApiError;

/// JSON body extractor that rejects with [`ApiError::BadRequest`]
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
