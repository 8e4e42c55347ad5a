//! Provider failure taxonomy
//!
//! Every variant is caught at the adapter boundary. Text, image and music
//! adapters turn it into a [`Fallback`](super::outcome::Fallback); only
//! speech synthesis lets it reach the HTTP layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection failure or request timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the provider
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Asynchronous job reached a terminal failure state
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    /// Asynchronous job did not finish within the polling budget
    #[error("Prediction timed out after {0} seconds")]
    PredictionTimeout(u64),

    #[error("API key not configured for {0}")]
    MissingApiKey(&'static str),

    #[error("No audio data returned")]
    NoAudio,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// Turn a non-success response into [`ProviderError::Api`]
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Api(status.as_u16(), truncate(&body, 200)))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
