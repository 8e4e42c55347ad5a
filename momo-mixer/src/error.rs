//! Error types for momo-mixer
//!
//! None of these reach HTTP clients: any mixing error degrades the result
//! to a client-side mix plan.

use thiserror::Error;

/// Mixing failure
#[derive(Error, Debug)]
pub enum MixError {
    /// Server-side mixing is disabled or not compiled in
    #[error("Server-side mixing unavailable")]
    Unavailable,

    /// Narration payload is not valid base64
    #[error("Invalid narration payload: {0}")]
    InvalidNarration(String),

    /// Audio bytes could not be decoded
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Decoded audio contained no samples
    #[error("Audio stream is empty: {0}")]
    EmptyAudio(&'static str),

    /// Sample rate conversion failed
    #[error("Resampling failed: {0}")]
    Resample(String),

    /// MP3 encoder failed
    #[error("Audio encode error: {0}")]
    Encode(String),

    /// Background track could not be fetched
    #[error("Background track fetch failed: {0}")]
    Fetch(String),

    /// Blocking worker panicked or was cancelled
    #[error("Mixing task failed: {0}")]
    Task(String),
}

/// Convenience Result type for mixing operations
pub type Result<T> = std::result::Result<T, MixError>;
