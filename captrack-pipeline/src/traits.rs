//! Collaborator seams for the transcript pipeline.

use crate::error::Result;
use captrack_core::transcript::Transcript;
use std::path::{Path, PathBuf};

/// Timed text segment returned by a transcription service.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// What a transcription service produced for one audio file.
#[derive(Clone, Debug, PartialEq)]
pub enum Transcription {
    /// Segments with timestamps
    Timed(Vec<Segment>),
    /// One block of text without timing
    Untimed(String),
}

impl Transcription {
    /// Convert to a transcript; untimed text spans `duration` seconds.
    pub fn into_transcript(self, duration: f64) -> Transcript {
        match self {
            Transcription::Timed(segments) => Transcript::from_segments(
                segments
                    .into_iter()
                    .map(|s| (s.text.trim().to_string(), s.start, s.end)),
            ),
            Transcription::Untimed(text) if text.trim().is_empty() => Transcript::default(),
            Transcription::Untimed(text) => Transcript::untimed(text.trim(), duration),
        }
    }
}

/// Produces an audio file from a media clip.
pub trait ExtractAudio {
    /// Extract audio from `media`, returning the audio file path.
    fn extract_audio(&self, media: &Path) -> Result<PathBuf>;
}

/// Speech-to-text service.
pub trait Transcribe {
    fn transcribe(&self, audio: &Path) -> Result<Transcription>;
}

/// Transcript translation service.
pub trait Translate {
    /// Translate a `start::end::text` blob into `language`, keeping timestamps.
    fn translate(&self, language: &str, transcript: &str) -> Result<String>;
}
