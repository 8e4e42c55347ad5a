//! In-memory audio decoding using symphonia
//!
//! Narration arrives as base64 text and background beds are read whole, so
//! decoding works on byte buffers rather than files. Output is always
//! interleaved stereo.

use crate::error::{MixError, Result};
use crate::overlay::{downmix_to_stereo, PcmAudio};
use std::io::{Cursor, ErrorKind};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Decode a complete MP3 or WAV buffer to stereo f32 PCM
pub fn decode_bytes(bytes: Vec<u8>, label: &'static str) -> Result<PcmAudio> {
    if bytes.is_empty() {
        return Err(MixError::EmptyAudio(label));
    }

    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let detected = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| MixError::Decode(format!("{}: failed to detect format: {}", label, e)))?;

    let mut format = detected.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| MixError::Decode(format!("{}: no audio track found", label)))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| MixError::Decode(format!("{}: failed to create decoder: {}", label, e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => {
                warn!("{}: error reading packet: {}", label, e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count() as u16;

                let buf = sample_buf.get_or_insert_with(|| {
                    SampleBuffer::<f32>::new(decoded.capacity() as u64, spec)
                });
                if buf.capacity() < decoded.capacity() * spec.channels.count() {
                    *buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                }
                buf.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buf.samples());
            }
            Err(SymphoniaError::DecodeError(e)) => {
                warn!("{}: skipping corrupt packet: {}", label, e);
                continue;
            }
            Err(e) => {
                return Err(MixError::Decode(format!("{}: {}", label, e)));
            }
        }
    }

    if samples.is_empty() || sample_rate == 0 || channels == 0 {
        return Err(MixError::EmptyAudio(label));
    }

    debug!(
        "Decoded {}: {} frames at {}Hz, {} channel(s)",
        label,
        samples.len() / channels as usize,
        sample_rate,
        channels
    );

    Ok(PcmAudio {
        samples: downmix_to_stereo(&samples, channels),
        sample_rate,
        channels: 2,
    })
}
