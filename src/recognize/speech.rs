use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use super::{RecognitionError, SpeechTranscriber};

/// Default locale for dictated registrations.
pub const SPEECH_LANGUAGE: &str = "es-ES";

/// Cloud speech-to-text client.
///
/// Posts the audio as base64 to a Speech-API-shaped endpoint and takes the
/// top alternative of the first result. An empty result set means the service
/// could not confidently transcribe the audio.
pub struct CloudTranscriber {
    endpoint: String,
    language: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct SpeechResponse {
    #[serde(default)]
    results: Vec<SpeechResult>,
}

#[derive(Debug, Deserialize)]
struct SpeechResult {
    #[serde(default)]
    alternatives: Vec<SpeechAlternative>,
}

#[derive(Debug, Deserialize)]
struct SpeechAlternative {
    #[serde(default)]
    transcript: String,
}

impl CloudTranscriber {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            language: SPEECH_LANGUAGE.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }
}

impl SpeechTranscriber for CloudTranscriber {
    fn transcribe(&self, audio_wav: &[u8]) -> Result<String, RecognitionError> {
        let body = json!({
            "config": { "languageCode": self.language },
            "audio": { "content": BASE64.encode(audio_wav) },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| RecognitionError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| RecognitionError::Transport(e.to_string()))?;

        let parsed: SpeechResponse = response
            .json()
            .map_err(|e| RecognitionError::Transport(e.to_string()))?;

        let transcript = parsed
            .results
            .first()
            .and_then(|r| r.alternatives.first())
            .map(|a| a.transcript.trim().to_string())
            .unwrap_or_default();

        if transcript.is_empty() {
            tracing::warn!("Speech service returned no transcript");
            return Err(RecognitionError::UnintelligibleAudio);
        }
        Ok(transcript)
    }
}

/// Mock transcriber for unit testing without the cloud service.
pub struct MockTranscriber {
    pub transcript: Option<String>,
}

impl MockTranscriber {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: Some(transcript.to_string()),
        }
    }

    /// A mock that cannot understand the audio.
    pub fn unintelligible() -> Self {
        Self { transcript: None }
    }
}

impl SpeechTranscriber for MockTranscriber {
    fn transcribe(&self, _audio_wav: &[u8]) -> Result<String, RecognitionError> {
        match &self.transcript {
            Some(text) => Ok(text.clone()),
            None => Err(RecognitionError::UnintelligibleAudio),
        }
    }
}
