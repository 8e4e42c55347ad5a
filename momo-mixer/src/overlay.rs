//! Sample-level mixing operations
//!
//! All buffers are interleaved f32 PCM in the range [-1.0, 1.0]. Nothing in
//! this module decodes, encodes or allocates beyond the output buffer, so it
//! is always compiled regardless of the `server-mix` feature.

use momo_common::FadeCurve;

/// Gain applied to the background bed beneath narration
pub const BACKGROUND_ATTENUATION_DB: f32 = -15.0;

/// Fade-in length at the start of the mix
pub const FADE_IN_MS: u32 = 1000;

/// Fade-out length at the end of the mix
pub const FADE_OUT_MS: u32 = 2000;

/// Decoded audio, always interleaved
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmAudio {
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frames() as u64 * 1000 / self.sample_rate as u64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Number of whole copies of `source_len` needed to cover `target_len`
///
/// Matches the bed-looping rule: a shorter background is repeated
/// `target / source + 1` times and then truncated.
pub fn loop_count(source_len: usize, target_len: usize) -> usize {
    if source_len == 0 || source_len >= target_len {
        1
    } else {
        target_len / source_len + 1
    }
}

/// Repeat or truncate `background` to exactly `target_len` samples
///
/// An empty background yields silence.
pub fn loop_to_length(background: &[f32], target_len: usize) -> Vec<f32> {
    if background.is_empty() {
        return vec![0.0; target_len];
    }

    let copies = loop_count(background.len(), target_len);
    let mut looped = Vec::with_capacity(background.len() * copies);
    for _ in 0..copies {
        looped.extend_from_slice(background);
    }
    looped.truncate(target_len);
    looped
}

/// Linear gain for a level change in decibels
pub fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

pub fn attenuate(samples: &mut [f32], db: f32) {
    let gain = db_to_gain(db);
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}

/// Sum `bed` under `narration`; output length equals the narration length
///
/// Missing bed samples count as silence. Sums are clamped to [-1.0, 1.0].
pub fn overlay(narration: &[f32], bed: &[f32]) -> Vec<f32> {
    narration
        .iter()
        .enumerate()
        .map(|(i, &voice)| {
            let under = bed.get(i).copied().unwrap_or(0.0);
            (voice + under).clamp(-1.0, 1.0)
        })
        .collect()
}

/// Apply a fade-in and fade-out in place
///
/// The fade-out uses the curve's recommended pair. Windows longer than the
/// audio are shortened to the audio length; overlapping windows multiply.
pub fn apply_fades(
    samples: &mut [f32],
    sample_rate: u32,
    channels: u16,
    fade_in_ms: u32,
    fade_out_ms: u32,
    curve: FadeCurve,
) {
    if channels == 0 || sample_rate == 0 {
        return;
    }
    let channels = channels as usize;
    let total_frames = samples.len() / channels;
    if total_frames == 0 {
        return;
    }

    let to_frames = |ms: u32| ((ms as u64 * sample_rate as u64) / 1000) as usize;
    let fade_in_frames = to_frames(fade_in_ms).min(total_frames);
    let fade_out_frames = to_frames(fade_out_ms).min(total_frames);
    let fade_out_start = total_frames - fade_out_frames;
    let out_curve = curve.recommended_pair();

    for (frame_idx, frame) in samples.chunks_exact_mut(channels).enumerate() {
        let mut gain = 1.0;

        if frame_idx < fade_in_frames {
            gain *= curve.fade_in(frame_idx as f32 / fade_in_frames as f32);
        }
        if fade_out_frames > 0 && frame_idx >= fade_out_start {
            let position = (frame_idx - fade_out_start + 1) as f32 / fade_out_frames as f32;
            gain *= out_curve.fade_out(position);
        }

        if gain < 1.0 {
            for sample in frame.iter_mut() {
                *sample *= gain;
            }
        }
    }
}

/// Duplicate a mono buffer into interleaved stereo
pub fn mono_to_stereo(samples: &[f32]) -> Vec<f32> {
    let mut stereo = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        stereo.push(sample);
        stereo.push(sample);
    }
    stereo
}

/// Keep the first two channels of a multichannel buffer
pub fn downmix_to_stereo(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels.max(1) as usize;
    match channels {
        1 => mono_to_stereo(samples),
        2 => samples.to_vec(),
        _ => samples
            .chunks_exact(channels)
            .flat_map(|frame| [frame[0], frame[1]])
            .collect(),
    }
}
