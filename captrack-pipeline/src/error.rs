//! Error types for captrack-pipeline organized by pipeline stage.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline error variants organized by stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Audio extraction stage error
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Transcription or translation service error
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Transcript output error
    #[error(transparent)]
    Output(#[from] OutputError),

    /// Layout or language configuration error
    #[error(transparent)]
    Core(#[from] captrack_core::error::Error),
}

/// Audio extraction errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Source media does not exist
    #[error("input file not found: {0:?}")]
    InputNotFound(PathBuf),

    /// FFmpeg could not be started
    #[error("failed to run {program:?}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// FFmpeg exited with a failure status
    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// FFmpeg succeeded but produced no file
    #[error("extracted audio not found at {0:?}")]
    MissingOutput(PathBuf),

    /// WAV header could not be read
    #[error(transparent)]
    Wav(#[from] hound::Error),
}

/// Remote transcription/translation service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request could not be built or sent
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Audio upload could not be read
    #[error("failed to read audio {path:?}")]
    ReadAudio {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Completion contained no usable content
    #[error("empty response from {0}")]
    Empty(&'static str),
}

/// Transcript output errors.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory or temp file could not be created
    #[error("failed to prepare output in {dir:?}")]
    Prepare {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Final file could not be persisted
    #[error("failed to write transcript {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Translated text contained no parsable transcript line
    #[error("translation to {language} contained no valid transcript lines")]
    NoValidLines { language: String },
}

/// Result type alias for captrack-pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

// reqwest::Error → ServiceError → Error
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Service(ServiceError::Http(e))
    }
}

// hound::Error → ExtractError → Error
impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Extract(ExtractError::Wav(e))
    }
}
