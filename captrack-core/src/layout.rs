//! On-disk transcript layout: `<root>/<language>/<clip stem>.txt`.

use crate::error::{Error, Result};
use crate::index::{CaptionIndex, IndexBuild};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Transcript file extension.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Resolves transcript paths under a root directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptLayout {
    root: PathBuf,
}

impl TranscriptLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<data dir>/captrack/transcripts`, falling back to `./transcripts`.
    pub fn system_default() -> Self {
        let root = dirs::data_dir()
            .map(|d| d.join("captrack").join("transcripts"))
            .unwrap_or_else(|| PathBuf::from("transcripts"));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn language_dir(&self, language: &str) -> PathBuf {
        self.root.join(language)
    }

    /// Transcript path for a clip in one language.
    ///
    /// `clip` may be a bare name or a media path; only its file stem is used.
    pub fn transcript_path(&self, language: &str, clip: &Path) -> Result<PathBuf> {
        let stem = clip
            .file_stem()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidClip(clip.to_path_buf()))?;

        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(TRANSCRIPT_EXTENSION);
        Ok(self.language_dir(language).join(file_name))
    }

    /// Read a clip's transcript text; `Ok(None)` when the file does not exist.
    pub fn read_transcript(&self, language: &str, clip: &Path) -> Result<Option<String>> {
        let path = self.transcript_path(language, clip)?;

        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = ?path.display(), "no transcript for language");
                Ok(None)
            }
            Err(source) => Err(Error::ReadTranscript { path, source }),
        }
    }

    /// Build the caption index for a clip/language, if a transcript exists.
    pub fn load_index(&self, language: &str, clip: &Path) -> Result<Option<IndexBuild>> {
        Ok(self
            .read_transcript(language, clip)?
            .map(|text| CaptionIndex::build_from_str(&text)))
    }
}
