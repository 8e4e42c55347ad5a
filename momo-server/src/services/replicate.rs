//! Replicate predictions client
//!
//! Replicate runs models asynchronously: a prediction is created, then its
//! status is polled at a fixed interval until it reaches a terminal state
//! or the polling budget runs out. Shared by the SDXL image adapter and the
//! MusicGen music adapter.

use super::error::{check_status, ProviderError};
use momo_common::config::ProviderCredentials;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::debug;

pub const REPLICATE_BASE_URL: &str = "https://api.replicate.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Polling cadence and budget for one prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl PollPolicy {
    pub const IMAGE: PollPolicy = PollPolicy {
        interval: Duration::from_secs(2),
        max_wait: Duration::from_secs(60),
    };

    pub const MUSIC: PollPolicy = PollPolicy {
        interval: Duration::from_secs(3),
        max_wait: Duration::from_secs(120),
    };
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub output: Value,
    #[serde(default)]
    pub error: Value,
}

#[derive(Debug, Clone)]
pub struct ReplicatePredictions {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl ReplicatePredictions {
    pub fn new(http: reqwest::Client, credentials: &ProviderCredentials) -> Self {
        Self {
            http,
            api_key: credentials.api_key().map(str::to_string),
            base_url: credentials.base_url_or(REPLICATE_BASE_URL).to_string(),
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn auth_header(&self) -> Result<String, ProviderError> {
        self.api_key
            .as_deref()
            .map(|key| format!("Token {}", key))
            .ok_or(ProviderError::MissingApiKey("Replicate"))
    }

    pub async fn create(&self, version: &str, input: Value) -> Result<Prediction, ProviderError> {
        let response = self
            .http
            .post(format!("{}/predictions", self.base_url))
            .header("Authorization", self.auth_header()?)
            .json(&json!({ "version": version, "input": input }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Prediction, ProviderError> {
        let response = self
            .http
            .get(format!("{}/predictions/{}", self.base_url, id))
            .header("Authorization", self.auth_header()?)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    /// Create a prediction and poll it to completion; returns its output
    pub async fn run(
        &self,
        version: &str,
        input: Value,
        policy: PollPolicy,
    ) -> Result<Value, ProviderError> {
        let mut prediction = self.create(version, input).await?;
        debug!(id = %prediction.id, "Replicate prediction created");

        let started = Instant::now();
        loop {
            match prediction.status.as_str() {
                "succeeded" => return Ok(prediction.output),
                "failed" | "canceled" => {
                    let reason = match &prediction.error {
                        Value::String(message) => message.clone(),
                        Value::Null => prediction.status.clone(),
                        other => other.to_string(),
                    };
                    return Err(ProviderError::PredictionFailed(reason));
                }
                _ => {}
            }

            if started.elapsed() >= policy.max_wait {
                return Err(ProviderError::PredictionTimeout(policy.max_wait.as_secs()));
            }
            tokio::time::sleep(policy.interval).await;
            prediction = self.get(&prediction.id).await?;
        }
    }
}

/// First URL in a prediction output (a bare string or a list of strings)
pub fn first_url(output: &Value) -> Option<String> {
    match output {
        Value::String(url) => Some(url.clone()),
        Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
