//! Show subcommand - build a caption index from a transcript and inspect it.

use captrack_core::index::{CaptionIndex, IndexBuild};
use captrack_core::overlay::{Caption, CaptionOverlay};
use eyre::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// CLI arguments for index inspection.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to a `start::end::text` transcript
    pub transcript: PathBuf,

    /// Look up the caption at a playback second (repeatable)
    #[arg(long = "at", value_name = "SECS")]
    pub at: Vec<u64>,

    /// Print the build result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Resolved configuration for index inspection.
#[derive(Debug)]
pub struct Config {
    pub transcript: PathBuf,
    pub at: Vec<u64>,
    pub json: bool,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self {
            transcript: args.transcript,
            at: args.at,
            json: args.json,
        })
    }
}

#[derive(Debug, Serialize)]
struct Lookup<'a> {
    second: u64,
    caption: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    build: &'a IndexBuild,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    lookups: Vec<Lookup<'a>>,
}

pub fn execute(config: Config) -> Result<()> {
    let text = std::fs::read_to_string(&config.transcript)
        .wrap_err_with(|| format!("failed to read transcript: {:?}", config.transcript.display()))?;

    let build = CaptionIndex::build_from_str(&text);

    let output = if config.json {
        let report = Report {
            build: &build,
            lookups: config
                .at
                .iter()
                .map(|&second| Lookup {
                    second,
                    caption: build.index.lookup(second),
                })
                .collect(),
        };
        serde_json::to_string_pretty(&report)?
    } else {
        render(&build, &config.at)
    };

    println!("{output}");
    Ok(())
}

/// Human-readable summary: counts, problems, then lookups or caption runs.
pub fn render(build: &IndexBuild, at: &[u64]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} seconds indexed, {} lines skipped, {} overlapping seconds",
        build.index.len(),
        build.skipped.len(),
        build.overlaps.iter().map(|o| o.seconds()).sum::<u64>()
    );

    for skipped in &build.skipped {
        let _ = writeln!(out, "skipped line {}: {}", skipped.line, skipped.reason);
    }
    for overlap in &build.overlaps {
        let _ = writeln!(
            out,
            "seconds {}s..{}s kept from line {}, dropped from line {}",
            overlap.from, overlap.to, overlap.kept_line, overlap.dropped_line
        );
    }

    if at.is_empty() {
        for (start, end, text) in build.index.runs() {
            let _ = writeln!(out, "{:>13} {text}", format!("{start}s..{end}s"));
        }
    } else {
        let overlay = CaptionOverlay::new(Some(build.index.clone()));
        for &second in at {
            let text = match overlay.caption_at(second) {
                Caption::Text(text) => text,
                _ => "(no caption)",
            };
            let _ = writeln!(out, "{second:>6}s {text}");
        }
    }

    out.trim_end().to_string()
}
