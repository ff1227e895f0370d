//! Offline transcript pipeline.
//!
//! Turns a media clip into one transcript file per configured language:
//!
//! 1. [`extract`]: pull a 16kHz mono WAV out of the clip with FFmpeg
//! 2. [`openai`]: transcribe it, then translate the timed transcript per language
//! 3. [`pipeline`]: write each file under the [`captrack_core::layout::TranscriptLayout`],
//!    never replacing a file that already exists
//!
//! The collaborators sit behind the [`traits`] so the orchestration can be
//! driven by other services or by test doubles.
//!
//! ```no_run
//! use captrack_core::language::LanguageSet;
//! use captrack_core::layout::TranscriptLayout;
//! use captrack_pipeline::extract::Ffmpeg;
//! use captrack_pipeline::openai::OpenAiClient;
//! use captrack_pipeline::pipeline::Pipeline;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::builder("sk-...").build()?;
//! let ffmpeg = Ffmpeg::default();
//! let pipeline = Pipeline {
//!     layout: TranscriptLayout::new("transcripts"),
//!     languages: LanguageSet::default(),
//!     extractor: &ffmpeg,
//!     transcriber: &client,
//!     translator: &client,
//! };
//! let report = pipeline.run(Path::new("intro.mp4"))?;
//! println!("{report:?}");
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod error;
pub mod extract;
pub mod openai;
pub mod pipeline;
pub mod traits;
