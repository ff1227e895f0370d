//! OpenAI-compatible transcription and translation client.
//!
//! Transcription posts the audio to `{base_url}/audio/transcriptions` asking
//! for `verbose_json`, which carries per-segment timestamps. Servers that
//! only return `text` yield an untimed transcription. Translation sends the
//! serialized transcript to `{base_url}/chat/completions` and expects the
//! same `start::end::text` lines back.

use crate::error::{Result, ServiceError};
use crate::traits::{Segment, Transcribe, Transcription, Translate};
use reqwest::blocking::{Client, multipart};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_TRANSLATION_MODEL: &str = "gpt-4o-mini";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

// =============================================================================
// API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    segments: Option<Vec<TranscriptionSegment>>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionSegment {
    start: f64,
    end: f64,
    text: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// =============================================================================
// Client
// =============================================================================

/// Blocking client for an OpenAI-compatible API.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    transcription_model: String,
    translation_model: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("transcription_model", &self.transcription_model)
            .field("translation_model", &self.translation_model)
            .finish_non_exhaustive()
    }
}

/// Builder for [`OpenAiClient`].
#[derive(Clone)]
pub struct OpenAiClientBuilder {
    base_url: String,
    api_key: String,
    transcription_model: String,
    translation_model: String,
    timeout: Duration,
}

impl OpenAiClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn transcription_model(mut self, model: impl Into<String>) -> Self {
        self.transcription_model = model.into();
        self
    }

    pub fn translation_model(mut self, model: impl Into<String>) -> Self {
        self.translation_model = model.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<OpenAiClient> {
        let http = Client::builder().timeout(self.timeout).build()?;

        Ok(OpenAiClient {
            http,
            base_url: self.base_url.trim().trim_end_matches('/').to_string(),
            api_key: self.api_key,
            transcription_model: self.transcription_model,
            translation_model: self.translation_model,
        })
    }
}

impl OpenAiClient {
    pub fn builder(api_key: impl Into<String>) -> OpenAiClientBuilder {
        OpenAiClientBuilder {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            translation_model: DEFAULT_TRANSLATION_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request and return the body of a successful response.
    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<String> {
        let response = request.bearer_auth(&self.api_key).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            }
            .into());
        }

        Ok(body)
    }
}

impl Transcribe for OpenAiClient {
    fn transcribe(&self, audio: &Path) -> Result<Transcription> {
        tracing::info!(
            audio = ?audio.display(),
            model = %self.transcription_model,
            "requesting transcription"
        );

        let bytes = std::fs::read(audio).map_err(|source| ServiceError::ReadAudio {
            path: audio.to_path_buf(),
            source,
        })?;
        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/wav")?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.transcription_model.clone())
            .text("response_format", "verbose_json");

        let body = self.send(
            self.http
                .post(self.endpoint("audio/transcriptions"))
                .multipart(form),
        )?;

        let transcription = parse_transcription(&body)?;
        match &transcription {
            Transcription::Timed(segments) => {
                tracing::info!(segments = segments.len(), "transcription received")
            }
            Transcription::Untimed(text) => {
                tracing::warn!(chars = text.len(), "transcription has no timestamps")
            }
        }
        Ok(transcription)
    }
}

impl Translate for OpenAiClient {
    fn translate(&self, language: &str, transcript: &str) -> Result<String> {
        tracing::info!(
            language,
            model = %self.translation_model,
            "requesting translation"
        );

        let system = translation_prompt(language);
        let request = ChatCompletionRequest {
            model: &self.translation_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: transcript,
                },
            ],
            temperature: 0.0,
        };

        let body = self.send(
            self.http
                .post(self.endpoint("chat/completions"))
                .json(&request),
        )?;

        parse_completion(&body)
    }
}

/// System prompt asking for a line-preserving translation.
pub fn translation_prompt(language: &str) -> String {
    format!(
        "Translate the caption text of the following transcript into {language}. \
         Each line has the form `start::end::text`. Keep every line, keep the \
         `start::end::` prefix of each line exactly as given, and translate only \
         the text after the second `::`. Do not add commentary, numbering or code fences."
    )
}

fn parse_transcription(body: &str) -> Result<Transcription> {
    let response: TranscriptionResponse = serde_json::from_str(body).map_err(ServiceError::from)?;

    Ok(match response.segments {
        Some(segments) if !segments.is_empty() => Transcription::Timed(
            segments
                .into_iter()
                .map(|s| Segment::new(s.text, s.start, s.end))
                .collect(),
        ),
        _ => Transcription::Untimed(response.text),
    })
}

fn parse_completion(body: &str) -> Result<String> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(ServiceError::from)?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| strip_code_fence(&c).to_string())
        .filter(|c| !c.trim().is_empty())
        .ok_or(ServiceError::Empty("chat completion"))?;

    Ok(content)
}

/// Drop a surrounding ```` ``` ```` fence some models add despite instructions.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|s| s.strip_suffix("```"))
    else {
        return trimmed;
    };
    // Skip an optional language tag on the opening fence line.
    match inner.split_once('\n') {
        Some((_, rest)) => rest.trim(),
        None => inner.trim(),
    }
}

/// Best-effort extraction of `error.message` from an API error body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
