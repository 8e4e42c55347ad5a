//! MP3 encoding of the finished mix using LAME

use crate::error::{MixError, Result};
use mp3lame_encoder::{max_required_buffer_size, Builder, FlushNoGap, InterleavedPcm, Quality};
use tracing::debug;

/// Encode interleaved stereo f32 PCM as MP3 (LAME default 128 kbps CBR)
pub fn encode_mp3(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let mut builder =
        Builder::new().ok_or_else(|| MixError::Encode("failed to create LAME builder".into()))?;
    builder
        .set_num_channels(2)
        .map_err(|e| MixError::Encode(format!("channels: {:?}", e)))?;
    builder
        .set_sample_rate(sample_rate)
        .map_err(|e| MixError::Encode(format!("sample rate {}: {:?}", sample_rate, e)))?;
    builder
        .set_quality(Quality::Good)
        .map_err(|e| MixError::Encode(format!("quality: {:?}", e)))?;
    let mut encoder = builder
        .build()
        .map_err(|e| MixError::Encode(format!("build: {:?}", e)))?;

    let pcm: Vec<i16> = samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect();

    let mut out = Vec::with_capacity(max_required_buffer_size(pcm.len()));
    encoder
        .encode_to_vec(InterleavedPcm(&pcm), &mut out)
        .map_err(|e| MixError::Encode(format!("{:?}", e)))?;

    // Room for the final frames LAME holds back until flush
    out.reserve(7200);
    encoder
        .flush_to_vec::<FlushNoGap>(&mut out)
        .map_err(|e| MixError::Encode(format!("flush: {:?}", e)))?;

    debug!(
        "Encoded {} frames to {} MP3 bytes",
        pcm.len() / 2,
        out.len()
    );
    Ok(out)
}
