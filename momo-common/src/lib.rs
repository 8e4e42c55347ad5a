//! # MOMO Common Library
//!
//! Shared code for the MOMO memory service crates:
//! - Error and result types
//! - Configuration loading (TOML, environment, CLI overrides)
//! - Emotion labels and the static per-emotion lookup tables
//! - User profile model
//! - Fade curve definitions

pub mod config;
pub mod emotion;
pub mod error;
pub mod fade_curves;
pub mod profile;

pub use emotion::EmotionLabel;
pub use error::{Error, Result};
pub use fade_curves::FadeCurve;
pub use profile::UserProfile;
