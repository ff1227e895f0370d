//! WAV inspection.

use crate::error::Result;
use hound::WavReader;
use std::path::Path;

/// Sample rate produced by [`crate::extract::AudioFormat`] presets.
pub const SAMPLE_RATE: u32 = 16000;

/// Basic facts about an extracted WAV file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Length in seconds
    pub duration: f32,
}

/// Read a WAV header and compute its duration.
pub fn probe(path: impl AsRef<Path>) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    // `duration` counts frames (samples per channel).
    let frames = reader.duration();
    let duration = if spec.sample_rate == 0 {
        0.0
    } else {
        frames as f32 / spec.sample_rate as f32
    };

    Ok(WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        duration,
    })
}
