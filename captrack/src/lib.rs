//! Command-line front end for captrack.
//!
//! Subcommands:
//! - `transcribe`: run the offline transcript pipeline for a clip
//! - `show`: build a caption index from a transcript and inspect it
//! - `export`: convert a transcript to SRT
//! - `preview`: play a clip headlessly and print caption changes

pub mod cli;
pub mod config;
pub mod export;
pub mod preview;
pub mod show;
pub mod srt;
pub mod transcribe;
