//! Background bed sample rate conversion using rubato

use crate::error::{MixError, Result};
use rubato::{FastFixedIn, PolynomialDegree, Resampler};
use tracing::debug;

/// Resample interleaved audio from `input_rate` to `output_rate`
///
/// Returns a copy when the rates already match.
pub fn resample(
    input: &[f32],
    input_rate: u32,
    output_rate: u32,
    channels: u16,
) -> Result<Vec<f32>> {
    if input_rate == output_rate || input.is_empty() {
        return Ok(input.to_vec());
    }

    debug!(
        "Resampling background from {}Hz to {}Hz ({} channels)",
        input_rate, output_rate, channels
    );

    let planar_input = deinterleave(input, channels);
    let input_frames = planar_input[0].len();

    let mut resampler = FastFixedIn::<f32>::new(
        output_rate as f64 / input_rate as f64,
        1.0,
        PolynomialDegree::Septic,
        input_frames,
        channels as usize,
    )
    .map_err(|e| MixError::Resample(format!("failed to create resampler: {}", e)))?;

    let planar_output = resampler
        .process(&planar_input, None)
        .map_err(|e| MixError::Resample(e.to_string()))?;

    Ok(interleave(planar_output))
}

/// [L, R, L, R] -> [[L, L], [R, R]]
fn deinterleave(samples: &[f32], channels: u16) -> Vec<Vec<f32>> {
    let channels = channels.max(1) as usize;
    let frames = samples.len() / channels;
    let mut planar = vec![Vec::with_capacity(frames); channels];

    for frame in samples.chunks_exact(channels) {
        for (ch, &sample) in frame.iter().enumerate() {
            planar[ch].push(sample);
        }
    }
    planar
}

/// [[L, L], [R, R]] -> [L, R, L, R]
fn interleave(planar: Vec<Vec<f32>>) -> Vec<f32> {
    let Some(first) = planar.first() else {
        return Vec::new();
    };
    let frames = first.len();
    let mut interleaved = Vec::with_capacity(frames * planar.len());

    for frame_idx in 0..frames {
        for channel in &planar {
            interleaved.push(channel[frame_idx]);
        }
    }
    interleaved
}
