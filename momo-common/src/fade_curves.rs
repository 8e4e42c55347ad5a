//! Fade curves for narration mixes
//!
//! A mixed narration fades in from silence and fades out to silence at the
//! end. The curve controls how gain moves between 0.0 and 1.0 over the fade
//! window; positions are normalized to 0.0..=1.0.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Gain curve applied across a fade window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// v(t) = t
    Linear,
    /// v(t) = t², slow start, fast finish
    Exponential,
    /// v(t) = (1-t)² on fade-out, fast start, slow finish
    Logarithmic,
    /// v(t) = 0.5 × (1 - cos(π × t))
    SCurve,
}

impl FadeCurve {
    /// Gain at `position` through a fade-in (0.0 = silent, 1.0 = full)
    pub fn fade_in(&self, position: f32) -> f32 {
        let t = position.clamp(0.0, 1.0);

        match self {
            FadeCurve::Linear => t,
            FadeCurve::Exponential => t * t,
            FadeCurve::Logarithmic => t.sqrt(),
            FadeCurve::SCurve => 0.5 * (1.0 - (PI * t).cos()),
        }
    }

    /// Gain at `position` through a fade-out (0.0 = full, 1.0 = silent)
    pub fn fade_out(&self, position: f32) -> f32 {
        let t = position.clamp(0.0, 1.0);

        match self {
            FadeCurve::Linear => 1.0 - t,
            FadeCurve::Exponential | FadeCurve::Logarithmic => {
                let inv = 1.0 - t;
                inv * inv
            }
            FadeCurve::SCurve => 0.5 * (1.0 + (PI * t).cos()),
        }
    }

    /// Curve that sounds balanced opposite this one
    pub fn recommended_pair(&self) -> FadeCurve {
        match self {
            FadeCurve::Exponential => FadeCurve::Logarithmic,
            FadeCurve::Logarithmic => FadeCurve::Exponential,
            other => *other,
        }
    }

    /// Parse a config value; accepts a few spelling aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Some(FadeCurve::Linear),
            "exponential" => Some(FadeCurve::Exponential),
            "logarithmic" => Some(FadeCurve::Logarithmic),
            "cosine" | "scurve" | "s-curve" | "s_curve" => Some(FadeCurve::SCurve),
            _ => None,
        }
    }

    pub fn all_variants() -> &'static [FadeCurve] {
        &[
            FadeCurve::Linear,
            FadeCurve::Exponential,
            FadeCurve::Logarithmic,
            FadeCurve::SCurve,
        ]
    }
}

impl Default for FadeCurve {
    fn default() -> Self {
        FadeCurve::Linear
    }
}
