//! Provider outcomes
//!
//! A provider call either succeeds or yields a [`Fallback`]: a locally
//! computed substitute paired with the failure message. The fallback is a
//! normal, documented outcome, so adapters return
//! `Result<T, Fallback<T>>` instead of an error type.

use serde::Serialize;
use std::fmt::Display;

/// Substitute value produced after a failed provider call
#[derive(Debug, Clone, PartialEq)]
pub struct Fallback<T> {
    pub value: T,
    pub message: String,
}

impl<T> Fallback<T> {
    pub fn new(value: T, cause: impl Display) -> Self {
        Self {
            value,
            message: cause.to_string(),
        }
    }
}

pub type ProviderResult<T> = Result<T, Fallback<T>>;

/// Values that know which provider produced them
pub trait Attributed {
    fn service(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}

/// Normalized `{status, message?, ...fields, service}` envelope
#[derive(Debug, Clone, Serialize)]
pub struct ProviderResponse<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
    pub service: &'static str,
}

impl<T> ProviderResponse<T> {
    /// Envelope for a value that does not carry its own attribution
    pub fn attributed(result: ProviderResult<T>, service: &'static str) -> Self {
        match result {
            Ok(data) => Self {
                status: Status::Success,
                message: None,
                data,
                service,
            },
            Err(fallback) => Self {
                status: Status::Error,
                message: Some(fallback.message),
                data: fallback.value,
                service,
            },
        }
    }
}

impl<T: Attributed> ProviderResponse<T> {
    pub fn from_result(result: ProviderResult<T>) -> Self {
        let service = match &result {
            Ok(data) => data.service(),
            Err(fallback) => fallback.value.service(),
        };
        Self::attributed(result, service)
    }
}
