//! Shared argument groups and their resolved configuration.
//!
//! Args structs are flattened into subcommands; each resolves into a
//! Config via TryFrom, where validation happens.

use captrack_core::layout::TranscriptLayout;
use captrack_pipeline::openai::{
    DEFAULT_BASE_URL, DEFAULT_TRANSCRIPTION_MODEL, DEFAULT_TRANSLATION_MODEL, OpenAiClient,
};
use color_eyre::Section;
use eyre::{Result, eyre};
use std::path::PathBuf;

/// Where transcripts live.
#[derive(clap::Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Transcript root directory (default: <data dir>/captrack/transcripts)
    #[arg(long, env = "CAPTRACK_ROOT")]
    pub root: Option<PathBuf>,
}

impl From<LayoutArgs> for TranscriptLayout {
    fn from(args: LayoutArgs) -> Self {
        match args.root {
            Some(root) => TranscriptLayout::new(root),
            None => TranscriptLayout::system_default(),
        }
    }
}

/// Transcription and translation service options.
#[derive(clap::Args, Clone)]
pub struct ApiArgs {
    /// Base URL of an OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API key (optional for self-hosted servers)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Speech-to-text model
    #[arg(long, default_value = DEFAULT_TRANSCRIPTION_MODEL)]
    pub transcription_model: String,

    /// Chat model used for translation
    #[arg(long, default_value = DEFAULT_TRANSLATION_MODEL)]
    pub translation_model: String,
}

impl std::fmt::Debug for ApiArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiArgs")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("transcription_model", &self.transcription_model)
            .field("translation_model", &self.translation_model)
            .finish()
    }
}

/// Resolved service configuration.
#[derive(Debug)]
pub struct ApiConfig {
    pub client: OpenAiClient,
}

impl TryFrom<ApiArgs> for ApiConfig {
    type Error = eyre::Error;

    fn try_from(args: ApiArgs) -> Result<Self> {
        let is_default_host = args.base_url.trim_end_matches('/') == DEFAULT_BASE_URL;
        let api_key = match args.api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None if is_default_host => {
                return Err(eyre!("no API key configured for {}", args.base_url)
                    .suggestion("set OPENAI_API_KEY or pass --api-key"));
            }
            None => String::new(),
        };

        let client = OpenAiClient::builder(api_key)
            .base_url(args.base_url)
            .transcription_model(args.transcription_model)
            .translation_model(args.translation_model)
            .build()?;

        Ok(Self { client })
    }
}
