//! Error types for captrack-core.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-level error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Language list configuration error
    #[error(transparent)]
    Language(#[from] LanguageError),

    /// Transcript file could not be read
    #[error("failed to read transcript {path:?}")]
    ReadTranscript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Clip path has no usable file stem
    #[error("clip path has no file name: {0:?}")]
    InvalidClip(PathBuf),
}

/// Reasons a single transcript line is rejected.
///
/// These never abort an index build; the offending line is skipped.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LineError {
    /// Wrong number of `::`-delimited fields
    #[error("expected 3 fields separated by `::`, found {0}")]
    FieldCount(usize),

    /// Start or end is not a decimal number
    #[error("invalid {field} time: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Start is negative
    #[error("negative start time: {0}")]
    NegativeStart(f64),

    /// End precedes start
    #[error("end {end} precedes start {start}")]
    Reversed { start: f64, end: f64 },

    /// End lies beyond the supported clip length
    #[error("end time {end}s exceeds maximum {max}s")]
    OutOfRange { end: f64, max: f64 },
}

/// Language list configuration errors.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LanguageError {
    /// No languages configured
    #[error("language list is empty")]
    Empty,

    /// Blank language name
    #[error("language name at position {0} is blank")]
    Blank(usize),

    /// Same language listed twice
    #[error("duplicate language: {0}")]
    Duplicate(String),

    /// Name would escape the transcript root
    #[error("language name contains a path separator: {0}")]
    PathSeparator(String),
}

/// Result type alias for captrack-core operations.
pub type Result<T> = std::result::Result<T, Error>;
