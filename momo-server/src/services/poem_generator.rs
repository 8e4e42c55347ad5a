//! Poem generation through the DeepSeek chat completions API

use super::error::{check_status, ProviderError};
use super::outcome::{Fallback, ProviderResult};
use async_trait::async_trait;
use momo_common::config::ProviderCredentials;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Text substituted for the poem when generation fails
pub const POEM_APOLOGY: &str = "Sorry, I cannot generate a poem right now. Please try again later.";

pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

const MODEL: &str = "deepseek-reasoner";
const SYSTEM_PROMPT: &str = "You are a modern poet who knows how to create poetry based on \
specific events and personal relationships";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Completes a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn service(&self) -> &'static str;

    /// On failure the fallback value is [`POEM_APOLOGY`]
    async fn generate(&self, prompt: &str) -> ProviderResult<String>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

pub struct DeepSeekPoet {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl DeepSeekPoet {
    pub fn new(http: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            http,
            api_key: credentials.api_key().map(str::to_string),
            endpoint: format!(
                "{}/chat/completions",
                credentials.base_url_or(DEEPSEEK_BASE_URL)
            ),
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey("DeepSeek"))?;

        let body = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "stream": false,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let chat: ChatResponse = check_status(response).await?.json().await?;
        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Parse("response has no choices".to_string()))
    }
}

#[async_trait]
impl TextGenerator for DeepSeekPoet {
    fn service(&self) -> &'static str {
        "deepseek"
    }

    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        debug!(prompt_chars = prompt.chars().count(), "Requesting poem");
        self.complete(prompt).await.map_err(|e| {
            warn!(service = "deepseek", error = %e, "Poem generation failed, using apology text");
            Fallback::new(POEM_APOLOGY.to_string(), e)
        })
    }
}
