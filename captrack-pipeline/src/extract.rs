//! FFmpeg audio extraction: 16kHz mono WAV next to the source clip.
//!
//! **Formats:** [`AudioFormat::Pcm16`] (16-bit, standard), [`AudioFormat::Float32`] (32-bit, higher precision)
//!
//! **Output:** `clip.mp4` → `clip.wav` in the same directory.

use crate::error::{ExtractError, Result};
use crate::traits::ExtractAudio;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Extension of extracted audio files.
pub const AUDIO_EXTENSION: &str = "wav";

/// 16kHz mono WAV format (pcm_s16le or pcm_f32le).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AudioFormat {
    /// 16-bit PCM (standard, smaller files)
    #[default]
    Pcm16,
    /// 32-bit float PCM (higher precision, ~2x larger)
    Float32,
}

impl AudioFormat {
    /// FFmpeg output args: `-ar 16000 -ac 1 -c:a pcm_s16le` (Pcm16) or `pcm_f32le` (Float32)
    pub fn ffmpeg_args(self) -> [&'static str; 6] {
        let codec = match self {
            AudioFormat::Pcm16 => "pcm_s16le",
            AudioFormat::Float32 => "pcm_f32le",
        };
        ["-ar", "16000", "-ac", "1", "-c:a", codec]
    }
}

/// Sibling audio path for a media file.
pub fn audio_path_for(media: &Path) -> PathBuf {
    media.with_extension(AUDIO_EXTENSION)
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(AUDIO_EXTENSION))
}

/// FFmpeg command-line extractor.
#[derive(Clone, Debug)]
pub struct Ffmpeg {
    /// Program to run; looked up on `PATH` when relative
    pub program: PathBuf,
    pub format: AudioFormat,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            format: AudioFormat::default(),
        }
    }
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Full argument list for one extraction.
    pub fn command_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.to_string_lossy().into_owned(),
            "-vn".to_string(),
        ];
        args.extend(self.format.ffmpeg_args().iter().map(|a| a.to_string()));
        args.push("-y".to_string());
        args.push(output.to_string_lossy().into_owned());
        args
    }
}

impl ExtractAudio for Ffmpeg {
    fn extract_audio(&self, media: &Path) -> Result<PathBuf> {
        if !media.exists() {
            return Err(ExtractError::InputNotFound(media.to_path_buf()).into());
        }

        if is_wav(media) {
            tracing::info!(path = ?media.display(), "input is already wav, skipping extraction");
            return Ok(media.to_path_buf());
        }

        let output = audio_path_for(media);
        tracing::info!(
            input = ?media.display(),
            output = ?output.display(),
            "extracting audio"
        );

        let result = Command::new(&self.program)
            .args(self.command_args(media, &output))
            .output()
            .map_err(|source| ExtractError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(ExtractError::Failed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            }
            .into());
        }

        if !output.exists() {
            return Err(ExtractError::MissingOutput(output).into());
        }

        Ok(output)
    }
}
