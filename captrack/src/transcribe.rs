//! Transcribe subcommand - produce per-language transcripts for a clip.

use crate::config::{ApiArgs, ApiConfig, LayoutArgs};
use captrack_core::language::LanguageSet;
use captrack_core::layout::TranscriptLayout;
use captrack_pipeline::extract::Ffmpeg;
use captrack_pipeline::openai::OpenAiClient;
use captrack_pipeline::pipeline::{LanguageOutcome, Pipeline, PipelineReport};
use color_eyre::Section;
use eyre::{Context, Result, eyre};
use std::path::PathBuf;
use std::time::Instant;

/// CLI arguments for transcript generation.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Media clip to transcribe (any format ffmpeg reads, or a WAV file)
    pub media: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Comma-separated languages; the first is the language spoken in the clip
    #[arg(long, default_value_t = LanguageSet::default())]
    pub languages: LanguageSet,

    /// FFmpeg executable
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    #[command(flatten)]
    pub api: ApiArgs,
}

/// Resolved configuration for transcript generation.
#[derive(Debug)]
pub struct Config {
    pub media: PathBuf,
    pub layout: TranscriptLayout,
    pub languages: LanguageSet,
    pub ffmpeg: Ffmpeg,
    pub client: OpenAiClient,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        if !args.media.is_file() {
            return Err(eyre!("media file not found: {:?}", args.media.display()));
        }

        let ApiConfig { client } = args.api.try_into()?;

        Ok(Self {
            media: args.media,
            layout: args.layout.into(),
            languages: args.languages,
            ffmpeg: Ffmpeg::new(args.ffmpeg),
            client,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        media = ?config.media.display(),
        root = ?config.layout.root().display(),
        languages = %config.languages,
        "transcribing clip"
    );

    let pipeline = Pipeline {
        layout: config.layout,
        languages: config.languages,
        extractor: &config.ffmpeg,
        transcriber: &config.client,
        translator: &config.client,
    };

    let s = Instant::now();

    let report = pipeline
        .run(&config.media)
        .wrap_err_with(|| format!("failed to transcribe {:?}", config.media.display()))
        .with_note(|| format!("transcripts are stored under {:?}", pipeline.layout.root().display()))?;

    tracing::info!(
        duration = %format!("{:.2}s", s.elapsed().as_secs_f32()),
        written = report.written(),
        existing = report.existing(),
        failed = report.failed(),
        "pipeline finished"
    );

    print!("{}", render(&report));

    if !report.is_complete() {
        return Err(eyre!("{} language(s) failed", report.failed())
            .suggestion("re-run the same command; finished languages are skipped"));
    }

    Ok(())
}

/// One line per language: status, then the path or failure reason.
pub fn render(report: &PipelineReport) -> String {
    report
        .outcomes
        .iter()
        .map(|(language, outcome)| match outcome {
            LanguageOutcome::Written { path, entries } => {
                format!("{language:<12} written   {} ({entries} entries)\n", path.display())
            }
            LanguageOutcome::Existing { path } => {
                format!("{language:<12} existing  {}\n", path.display())
            }
            LanguageOutcome::Failed { reason } => format!("{language:<12} failed    {reason}\n"),
        })
        .collect()
}
