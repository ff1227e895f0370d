//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use eyre::Result;

#[derive(Debug, Parser)]
#[command(name = "cap")]
#[command(about = "Per-second caption tracks: transcribe, translate, inspect and preview")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract, transcribe and translate a clip into per-language transcripts
    Transcribe(crate::transcribe::Args),

    /// Build a caption index from a transcript and print it
    Show(crate::show::Args),

    /// Convert a transcript to SRT subtitles
    Export(crate::export::Args),

    /// Play a clip headlessly and print caption changes
    Preview(crate::preview::Args),
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    match cli.command {
        Commands::Transcribe(args) => crate::transcribe::execute(args.try_into()?),
        Commands::Show(args) => crate::show::execute(args.try_into()?),
        Commands::Export(args) => crate::export::execute(args.try_into()?),
        Commands::Preview(args) => crate::preview::execute(args.try_into()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use captrack_core::language::LanguageSet;

    #[test]
    fn parses_transcribe_command() {
        let cli = Cli::parse_from([
            "cap",
            "transcribe",
            "intro.mp4",
            "--root",
            "/srv/captions",
            "--languages",
            "English,Korean",
        ]);

        match &cli.command {
            Commands::Transcribe(crate::transcribe::Args {
                media,
                layout,
                languages,
                ffmpeg,
                ..
            }) if media.to_str() == Some("intro.mp4") => {
                assert_eq!(layout.root.as_deref(), Some(std::path::Path::new("/srv/captions")));
                assert_eq!(languages, &LanguageSet::new(["English", "Korean"]).unwrap());
                assert_eq!(ffmpeg.to_str(), Some("ffmpeg"));
            }
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn transcribe_defaults_to_standard_languages() {
        let cli = Cli::parse_from(["cap", "transcribe", "intro.mp4"]);

        match &cli.command {
            Commands::Transcribe(args) => assert_eq!(args.languages, LanguageSet::default()),
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn rejects_duplicate_languages() {
        let result = Cli::try_parse_from([
            "cap",
            "transcribe",
            "intro.mp4",
            "--languages",
            "English,english",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn parses_show_with_lookups() {
        let cli = Cli::parse_from(["cap", "show", "intro.txt", "--at", "3", "--at", "7", "--json"]);

        match &cli.command {
            Commands::Show(crate::show::Args {
                transcript,
                at,
                json: true,
            }) if transcript.to_str() == Some("intro.txt") => assert_eq!(at, &[3, 7]),
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_export_with_output() {
        let cli = Cli::parse_from(["cap", "export", "intro.txt", "-o", "intro.srt"]);

        match &cli.command {
            Commands::Export(crate::export::Args {
                transcript,
                output: Some(output),
                preview: false,
            }) if transcript.to_str() == Some("intro.txt") && output.to_str() == Some("intro.srt") => {}
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_preview_speed_suffix() {
        let cli = Cli::parse_from(["cap", "preview", "intro.mp4", "--speed", "1.5x", "--fps", "30"]);

        match &cli.command {
            Commands::Preview(crate::preview::Args { speed, fps, .. }) => {
                assert_eq!(*speed, 1.5);
                assert_eq!(*fps, 30);
            }
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn rejects_invalid_speed() {
        assert!(Cli::try_parse_from(["cap", "preview", "intro.mp4", "--speed", "fast"]).is_err());
        assert!(Cli::try_parse_from(["cap", "preview", "intro.mp4", "--speed", "0x"]).is_err());
    }
}
