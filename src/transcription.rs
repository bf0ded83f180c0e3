//! Speech input: transcription contract and scoped microphone sessions
//!
//! The chat widget records audio and hands it to a transcription service.
//! Neither touches the scoring core.
//!
//! - [`Transcriber`] is the service seam. [`transcribe_audio`] folds its
//!   result into the tagged `{success, text}` / `{success: false, error}`
//!   shape the widget consumes.
//! - [`RecordingSession`] holds the microphone. It is opened before the first
//!   chunk is read and closed in `Drop`, so every exit path (end of stream,
//!   time limit, read error, panic) releases it.

use crate::locations::DEFAULT_SPEECH_LANGUAGE;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default recording cap
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

// ============================================================================
// Transcription
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("no audio to transcribe")]
    EmptyAudio,

    #[error("failed to upload audio: {0}")]
    Upload(String),

    #[error("transcription failed with status: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionOptions {
    pub language_code: String,
    #[serde(default)]
    pub word_boost: Vec<String>,
    /// Milliseconds to skip at the start of the audio
    #[serde(default)]
    pub audio_start_from: u64,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language_code: DEFAULT_SPEECH_LANGUAGE.to_string(),
            word_boost: Vec::new(),
            audio_start_from: 0,
        }
    }
}

impl TranscriptionOptions {
    pub fn for_language(code: &str) -> Self {
        Self {
            language_code: code.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscribedWord {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub words: Vec<TranscribedWord>,
}

/// Speech-to-text service
pub trait Transcriber {
    fn transcribe(&self, audio: &[u8], options: &TranscriptionOptions) -> Result<Transcript, TranscriptionError>;
}

/// Wire shape returned to the chat widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<TranscribedWord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<Transcript, TranscriptionError>> for TranscriptionResponse {
    fn from(result: Result<Transcript, TranscriptionError>) -> Self {
        match result {
            Ok(transcript) => Self {
                success: true,
                text: Some(transcript.text),
                words: Some(transcript.words),
                error: None,
            },
            Err(e) => Self {
                success: false,
                text: None,
                words: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Transcribe and fold failures into the response; never returns an error
pub fn transcribe_audio<T: Transcriber + ?Sized>(
    transcriber: &T,
    audio: &[u8],
    options: &TranscriptionOptions,
) -> TranscriptionResponse {
    let result = transcriber.transcribe(audio, options);
    if let Err(e) = &result {
        tracing::error!("Transcription error: {}", e);
    }
    result.into()
}

/// Offline stand-in that returns a fixed transcript for any non-empty audio
#[derive(Debug, Clone)]
pub struct ScriptedTranscriber {
    pub reply: String,
}

impl Default for ScriptedTranscriber {
    fn default() -> Self {
        Self {
            reply: "What crops should I grow this season?".to_string(),
        }
    }
}

impl Transcriber for ScriptedTranscriber {
    fn transcribe(&self, audio: &[u8], options: &TranscriptionOptions) -> Result<Transcript, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        tracing::debug!(
            "Scripted transcription of {} bytes ({})",
            audio.len(),
            options.language_code
        );
        Ok(Transcript {
            text: self.reply.clone(),
            words: Vec::new(),
        })
    }
}

// ============================================================================
// Recording
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordingError {
    #[error("microphone unavailable: {0}")]
    MicrophoneUnavailable(String),

    #[error("recording failed: {0}")]
    Stream(String),
}

/// A microphone-like audio source
pub trait AudioInput {
    /// Acquire the device
    fn open(&mut self) -> Result<(), RecordingError>;
    /// Next chunk, or `None` when the stream has ended
    fn read_chunk(&mut self) -> Result<Option<Vec<u8>>, RecordingError>;
    /// Release the device; must be safe to call after a failed read
    fn close(&mut self);
}

/// Open microphone; released when dropped
pub struct RecordingSession<'a, A: AudioInput + ?Sized> {
    input: &'a mut A,
}

impl<'a, A: AudioInput + ?Sized> RecordingSession<'a, A> {
    pub fn start(input: &'a mut A) -> Result<Self, RecordingError> {
        input.open()?;
        tracing::debug!("Microphone acquired");
        Ok(Self { input })
    }

    pub fn read_chunk(&mut self) -> Result<Option<Vec<u8>>, RecordingError> {
        self.input.read_chunk()
    }
}

impl<A: AudioInput + ?Sized> Drop for RecordingSession<'_, A> {
    fn drop(&mut self) {
        self.input.close();
        tracing::debug!("Microphone released");
    }
}

/// Record until the stream ends or `time_limit` elapses
pub fn record<A: AudioInput + ?Sized>(input: &mut A, time_limit: Duration) -> Result<Vec<u8>, RecordingError> {
    let mut session = RecordingSession::start(input)?;
    let started = Instant::now();
    let mut audio = Vec::new();

    while started.elapsed() < time_limit {
        match session.read_chunk()? {
            Some(chunk) => audio.extend_from_slice(&chunk),
            None => break,
        }
    }

    Ok(audio)
}
