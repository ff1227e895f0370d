//! Transcript pipeline orchestration.
//!
//! For one clip: find which languages still lack a transcript, extract and
//! transcribe the audio if the original-language transcript is missing, then
//! translate it into each missing language in order. Files are written via a
//! temp file persisted without clobbering, so a failed or concurrent run never
//! leaves a partial file and never replaces an existing one. Re-running on a
//! finished clip does nothing.

use crate::audio;
use crate::error::{OutputError, Result, ServiceError};
use crate::traits::{ExtractAudio, Transcribe, Transcription, Translate};
use captrack_core::language::LanguageSet;
use captrack_core::layout::TranscriptLayout;
use captrack_core::transcript::parse_lines;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What happened to one language's transcript.
#[derive(Clone, Debug, PartialEq)]
pub enum LanguageOutcome {
    /// File was created
    Written { path: PathBuf, entries: usize },
    /// File already existed and was left untouched
    Existing { path: PathBuf },
    /// Producing this language failed; nothing was written
    Failed { reason: String },
}

/// Per-language results of one pipeline run, in language order.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    pub clip: PathBuf,
    pub outcomes: Vec<(String, LanguageOutcome)>,
}

impl PipelineReport {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, LanguageOutcome::Written { .. }))
    }

    pub fn existing(&self) -> usize {
        self.count(|o| matches!(o, LanguageOutcome::Existing { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, LanguageOutcome::Failed { .. }))
    }

    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, language: &str) -> Option<&LanguageOutcome> {
        self.outcomes
            .iter()
            .find(|(l, _)| l == language)
            .map(|(_, o)| o)
    }

    fn count(&self, pred: impl Fn(&LanguageOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Produces transcripts for every configured language of a clip.
pub struct Pipeline<'a> {
    pub layout: TranscriptLayout,
    pub languages: LanguageSet,
    pub extractor: &'a dyn ExtractAudio,
    pub transcriber: &'a dyn Transcribe,
    pub translator: &'a dyn Translate,
}

impl Pipeline<'_> {
    /// Run the pipeline for one media clip.
    ///
    /// Extraction and transcription failures abort the run. A translation
    /// failure is recorded for its language and the remaining languages
    /// are still attempted.
    pub fn run(&self, media: &Path) -> Result<PipelineReport> {
        let mut slots: Vec<Option<LanguageOutcome>> = vec![None; self.languages.len()];
        let mut pending = Vec::new();

        for (i, language) in self.languages.iter().enumerate() {
            let path = self.layout.transcript_path(language, media)?;
            if path.exists() {
                tracing::info!(language, path = ?path.display(), "transcript exists, skipping");
                slots[i] = Some(LanguageOutcome::Existing { path });
            } else {
                pending.push((i, language, path));
            }
        }

        if pending.is_empty() {
            tracing::info!(clip = ?media.display(), "all transcripts present");
            return Ok(self.report(media, slots));
        }

        let original = self.languages.original();
        let existing_original = match slots[0] {
            Some(_) => self.layout.read_transcript(original, media)?,
            None => None,
        };

        let source_blob = match existing_original {
            Some(blob) => blob,
            None => {
                let path = self.layout.transcript_path(original, media)?;
                let (blob, outcome) = self.transcribe_original(media, &path)?;
                slots[0] = Some(outcome);
                blob
            }
        };
        pending.retain(|(i, _, _)| *i != 0);

        for (i, language, path) in pending {
            let outcome = match self.translate_into(language, &source_blob, &path) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(language, error = %e, "translation failed");
                    LanguageOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            slots[i] = Some(outcome);
        }

        Ok(self.report(media, slots))
    }

    fn report(&self, media: &Path, slots: Vec<Option<LanguageOutcome>>) -> PipelineReport {
        let outcomes = self
            .languages
            .iter()
            .zip(slots)
            .filter_map(|(language, outcome)| Some((language.to_string(), outcome?)))
            .collect();

        PipelineReport {
            clip: media.to_path_buf(),
            outcomes,
        }
    }

    /// Extract, transcribe and write the original-language transcript.
    fn transcribe_original(&self, media: &Path, path: &Path) -> Result<(String, LanguageOutcome)> {
        let audio_path = self.extractor.extract_audio(media)?;
        let transcription = self.transcriber.transcribe(&audio_path)?;

        let duration = match &transcription {
            Transcription::Timed(_) => 0.0,
            Transcription::Untimed(_) => f64::from(audio::probe(&audio_path)?.duration),
        };

        let mut transcript = transcription.into_transcript(duration);
        let rejected = transcript.retain_valid();
        if let Some(first) = rejected.first() {
            tracing::warn!(
                media = ?media.display(),
                dropped = rejected.len(),
                first = %first,
                "dropped invalid transcription segments"
            );
        }
        if transcript.is_empty() {
            return Err(ServiceError::Empty("transcription").into());
        }

        let blob = transcript.to_blob();
        let outcome = write_new(path, &blob, transcript.entries.len())?;
        Ok((blob, outcome))
    }

    /// Translate the source transcript and write it for one language.
    fn translate_into(&self, language: &str, source: &str, path: &Path) -> Result<LanguageOutcome> {
        let translated = self.translator.translate(language, source)?;

        let (valid, total) = parse_lines(translated.lines())
            .fold((0, 0), |(valid, total), (_, parsed)| {
                (valid + usize::from(parsed.is_ok()), total + 1)
            });

        if valid == 0 {
            return Err(OutputError::NoValidLines {
                language: language.to_string(),
            }
            .into());
        }
        if valid < total {
            tracing::warn!(
                language,
                valid,
                malformed = total - valid,
                "translated transcript has malformed lines"
            );
        }

        let mut blob = translated.trim_end().to_string();
        blob.push('\n');
        write_new(path, &blob, valid)
    }
}

/// Write `contents` to `path` unless it already exists.
///
/// The data goes to a temp file in the target directory first and is moved
/// into place with no-clobber semantics.
pub fn write_new(path: &Path, contents: &str, entries: usize) -> Result<LanguageOutcome> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let prepare = |source| OutputError::Prepare {
        dir: dir.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(prepare)?;
    let mut file = NamedTempFile::new_in(dir).map_err(prepare)?;

    file.write_all(contents.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    match file.persist_noclobber(path) {
        Ok(_) => {
            tracing::info!(path = ?path.display(), entries, "transcript written");
            Ok(LanguageOutcome::Written {
                path: path.to_path_buf(),
                entries,
            })
        }
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            tracing::info!(path = ?path.display(), "transcript appeared concurrently, keeping it");
            Ok(LanguageOutcome::Existing {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(OutputError::Write {
            path: path.to_path_buf(),
            source: e.error,
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::Segment;
    use std::cell::{Cell, RefCell};

    struct FakeExtractor {
        calls: Cell<usize>,
    }

    impl ExtractAudio for FakeExtractor {
        fn extract_audio(&self, media: &Path) -> Result<PathBuf> {
            self.calls.set(self.calls.get() + 1);
            Ok(media.with_extension("wav"))
        }
    }

    struct FakeTranscriber {
        calls: Cell<usize>,
        result: Transcription,
    }

    impl Transcribe for FakeTranscriber {
        fn transcribe(&self, _audio: &Path) -> Result<Transcription> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.result.clone())
        }
    }

    /// Prefixes each caption with the language; fails or garbles on request.
    struct FakeTranslator {
        requested: RefCell<Vec<String>>,
        failing: &'static [&'static str],
        garbling: &'static [&'static str],
    }

    impl Translate for FakeTranslator {
        fn translate(&self, language: &str, transcript: &str) -> Result<String> {
            self.requested.borrow_mut().push(language.to_string());
            if self.failing.contains(&language) {
                return Err(ServiceError::Api {
                    status: 503,
                    message: "overloaded".to_string(),
                }
                .into());
            }
            if self.garbling.contains(&language) {
                return Ok("Sorry, I cannot translate this.".to_string());
            }
            Ok(transcript
                .lines()
                .map(|line| {
                    let (prefix, text) = line.rsplit_once("::").unwrap();
                    format!("{prefix}::[{language}] {text}\n")
                })
                .collect())
        }
    }

    struct Fixture {
        dir: tempfile::TempDir,
        extractor: FakeExtractor,
        transcriber: FakeTranscriber,
        translator: FakeTranslator,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
                extractor: FakeExtractor { calls: Cell::new(0) },
                transcriber: FakeTranscriber {
                    calls: Cell::new(0),
                    result: Transcription::Timed(vec![
                        Segment::new(" Hello.", 0.0, 1.5),
                        Segment::new(" Bye.", 1.5, 3.0),
                    ]),
                },
                translator: FakeTranslator {
                    requested: RefCell::new(Vec::new()),
                    failing: &[],
                    garbling: &[],
                },
            }
        }

        fn pipeline(&self, languages: &str) -> Pipeline<'_> {
            Pipeline {
                layout: TranscriptLayout::new(self.dir.path()),
                languages: languages.parse().unwrap(),
                extractor: &self.extractor,
                transcriber: &self.transcriber,
                translator: &self.translator,
            }
        }

        fn read(&self, language: &str) -> Option<String> {
            std::fs::read_to_string(self.dir.path().join(language).join("clip.txt")).ok()
        }
    }

    #[test]
    fn writes_original_and_translations() {
        let fx = Fixture::new();
        let report = fx.pipeline("English,Spanish,French").run(Path::new("clip.mp4")).unwrap();

        assert_eq!(report.written(), 3);
        assert!(report.is_complete());
        assert_eq!(fx.read("English").unwrap(), "0.00::1.50::Hello.\n1.50::3.00::Bye.\n");
        assert_eq!(
            fx.read("Spanish").unwrap(),
            "0.00::1.50::[Spanish] Hello.\n1.50::3.00::[Spanish] Bye.\n"
        );
        assert_eq!(*fx.translator.requested.borrow(), ["Spanish", "French"]);

        let languages: Vec<_> = report.outcomes.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(languages, ["English", "Spanish", "French"]);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let fx = Fixture::new();
        let pipeline = fx.pipeline("English,Spanish");
        pipeline.run(Path::new("clip.mp4")).unwrap();

        let report = pipeline.run(Path::new("clip.mp4")).unwrap();

        assert_eq!(report.existing(), 2);
        assert_eq!(fx.extractor.calls.get(), 1);
        assert_eq!(fx.transcriber.calls.get(), 1);
        assert_eq!(fx.translator.requested.borrow().len(), 1);
    }

    #[test]
    fn existing_files_are_not_overwritten() {
        let fx = Fixture::new();
        let spanish = fx.dir.path().join("Spanish");
        std::fs::create_dir_all(&spanish).unwrap();
        std::fs::write(spanish.join("clip.txt"), "0.00::9.00::hand edited\n").unwrap();

        let report = fx.pipeline("English,Spanish").run(Path::new("clip.mp4")).unwrap();

        assert_eq!(fx.read("Spanish").unwrap(), "0.00::9.00::hand edited\n");
        assert!(matches!(
            report.outcome("Spanish"),
            Some(LanguageOutcome::Existing { .. })
        ));
        assert!(fx.translator.requested.borrow().is_empty());
    }

    #[test]
    fn missing_translation_reuses_existing_original() {
        let fx = Fixture::new();
        let english = fx.dir.path().join("English");
        std::fs::create_dir_all(&english).unwrap();
        std::fs::write(english.join("clip.txt"), "0.00::2.00::Kept.\n").unwrap();

        fx.pipeline("English,German").run(Path::new("clip.mp4")).unwrap();

        assert_eq!(fx.extractor.calls.get(), 0);
        assert_eq!(fx.transcriber.calls.get(), 0);
        assert_eq!(fx.read("German").unwrap(), "0.00::2.00::[German] Kept.\n");
    }

    #[test]
    fn translation_failure_does_not_stop_other_languages() {
        let mut fx = Fixture::new();
        fx.translator.failing = &["Spanish"];

        let report = fx
            .pipeline("English,Spanish,French")
            .run(Path::new("clip.mp4"))
            .unwrap();

        assert_eq!(report.failed(), 1);
        assert!(fx.read("Spanish").is_none());
        assert!(fx.read("French").is_some());
        assert!(!fx.dir.path().join("Spanish").join("clip.txt").exists());
    }

    #[test]
    fn translation_without_valid_lines_is_rejected() {
        let mut fx = Fixture::new();
        fx.translator.garbling = &["French"];

        let report = fx.pipeline("English,French").run(Path::new("clip.mp4")).unwrap();

        match report.outcome("French") {
            Some(LanguageOutcome::Failed { reason }) => assert!(reason.contains("French")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(fx.read("French").is_none());
    }

    #[test]
    fn empty_transcription_writes_nothing() {
        let mut fx = Fixture::new();
        fx.transcriber.result = Transcription::Timed(Vec::new());

        let err = fx.pipeline("English,Spanish").run(Path::new("clip.mp4")).unwrap_err();

        assert!(matches!(err, Error::Service(ServiceError::Empty(_))));
        assert!(fx.read("English").is_none());
        assert!(fx.translator.requested.borrow().is_empty());
    }

    #[test]
    fn write_new_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("English").join("clip.txt");

        let first = write_new(&path, "0.00::1.00::A\n", 1).unwrap();
        assert!(matches!(first, LanguageOutcome::Written { entries: 1, .. }));

        let second = write_new(&path, "0.00::1.00::B\n", 1).unwrap();
        assert!(matches!(second, LanguageOutcome::Existing { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0.00::1.00::A\n");
    }

    #[test]
    fn write_new_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.txt");

        write_new(&path, "x", 0).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, ["clip.txt"]);
    }

    #[test]
    fn report_counts_outcomes() {
        let report = PipelineReport {
            clip: PathBuf::from("clip.mp4"),
            outcomes: vec![
                (
                    "English".into(),
                    LanguageOutcome::Existing {
                        path: "a".into(),
                    },
                ),
                (
                    "Spanish".into(),
                    LanguageOutcome::Written {
                        path: "b".into(),
                        entries: 3,
                    },
                ),
                (
                    "French".into(),
                    LanguageOutcome::Failed {
                        reason: "boom".into(),
                    },
                ),
            ],
        };

        assert_eq!(report.existing(), 1);
        assert_eq!(report.written(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_complete());
        assert!(matches!(
            report.outcome("French"),
            Some(LanguageOutcome::Failed { .. })
        ));
    }
}
