//! Emotion labels
//!
//! The emotion label drives every downstream style, voice and music choice.
//! Only three labels are recognized; anything else is carried through as
//! [`EmotionLabel::Unrecognized`] so that prompts can still echo the raw
//! value while every lookup table resolves to its default entry.

mod tables;

pub use tables::{BackgroundTrack, LibraryTrack, MusicFeatures, VoiceSettings, CHEER_ME_UP};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotion label produced by the classifier or supplied by a client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmotionLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
    /// Any value outside the recognized set, kept verbatim
    Unrecognized(String),
}

impl EmotionLabel {
    /// The three labels a classifier may produce
    pub const RECOGNIZED: [EmotionLabel; 3] = [
        EmotionLabel::Positive,
        EmotionLabel::Negative,
        EmotionLabel::Neutral,
    ];

    /// Parse a label, case-insensitively. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => EmotionLabel::Positive,
            "negative" => EmotionLabel::Negative,
            "neutral" => EmotionLabel::Neutral,
            _ => EmotionLabel::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EmotionLabel::Positive => "positive",
            EmotionLabel::Negative => "negative",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, EmotionLabel::Unrecognized(_))
    }

    /// Label with the first letter upper-cased ("Positive"), used in titles
    pub fn capitalized(&self) -> String {
        let label = self.as_str();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EmotionLabel::parse(s))
    }
}

impl From<String> for EmotionLabel {
    fn from(raw: String) -> Self {
        EmotionLabel::parse(&raw)
    }
}

impl From<EmotionLabel> for String {
    fn from(label: EmotionLabel) -> Self {
        label.as_str().to_string()
    }
}
