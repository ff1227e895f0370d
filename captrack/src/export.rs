//! Export subcommand - convert a transcript to SRT subtitles.

use crate::srt;
use captrack_core::transcript::{TranscriptEntry, parse_lines};
use color_eyre::Section;
use eyre::{Context, Result, eyre};
use std::path::{Path, PathBuf};

/// CLI arguments for SRT export.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to a `start::end::text` transcript
    pub transcript: PathBuf,

    /// Output SRT path (default: same as input with .srt extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the first and last subtitles after writing
    #[arg(long)]
    pub preview: bool,
}

/// Resolved configuration for SRT export.
#[derive(Debug)]
pub struct Config {
    pub transcript: PathBuf,
    pub output: PathBuf,
    pub preview: bool,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        let output = args
            .output
            .unwrap_or_else(|| args.transcript.with_extension("srt"));

        if output == args.transcript {
            return Err(eyre!("output would overwrite the transcript: {:?}", output.display())
                .suggestion("pass a different path with -o"));
        }

        Ok(Self {
            transcript: args.transcript,
            output,
            preview: args.preview,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        input = ?config.transcript.display(),
        output = ?config.output.display(),
        "exporting srt"
    );

    let entries = read_entries(&config.transcript)?;
    let subtitles = srt::to_subtitles(&entries);

    std::fs::write(&config.output, srt::display_subtitles(&subtitles))
        .wrap_err_with(|| format!("failed to write srt: {:?}", config.output.display()))?;

    tracing::info!(path = ?config.output.display(), subtitles = subtitles.len(), "srt written");

    if config.preview {
        println!("{}", srt::preview_subtitles(&subtitles, 3, 3));
    }

    Ok(())
}

/// Valid entries of a transcript file in file order; malformed lines are logged and dropped.
pub fn read_entries(path: &Path) -> Result<Vec<TranscriptEntry>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read transcript: {:?}", path.display()))?;

    Ok(parse_lines(text.lines())
        .filter_map(|(line, parsed)| {
            parsed
                .inspect_err(|reason| {
                    tracing::warn!(line, %reason, "skipping malformed transcript line")
                })
                .ok()
        })
        .collect())
}
