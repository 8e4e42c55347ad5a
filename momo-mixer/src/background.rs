//! Background bed lookup
//!
//! Beds live under `<static_dir>/audio/background`. A missing local file is
//! fetched from the track's remote copy instead.

use crate::error::{MixError, Result};
use momo_common::emotion::BackgroundTrack;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Load the bed bytes, preferring the local file
pub async fn load_background(
    dir: &Path,
    track: BackgroundTrack,
    http: &reqwest::Client,
) -> Result<Vec<u8>> {
    let local = dir.join(track.file);
    match tokio::fs::read(&local).await {
        Ok(bytes) => {
            debug!("Using local background track {}", local.display());
            return Ok(bytes);
        }
        Err(e) => {
            info!(
                "Local background track {} unavailable ({}), fetching remote copy",
                local.display(),
                e
            );
        }
    }

    let response = http
        .get(track.fallback_url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(|e| MixError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MixError::Fetch(format!("{} returned {}", track.fallback_url, status)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| MixError::Fetch(e.to_string()))?;
    Ok(bytes.to_vec())
}
