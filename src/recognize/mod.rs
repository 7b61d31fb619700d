//! Text recognizer adapters — the seam around external OCR and speech
//! services.
//!
//! Both adapters hand their raw text back to the presentation layer as an
//! editable value; extraction always runs on the final (possibly
//! user-corrected) text, never on the engine output directly.

pub mod ocr;
pub mod speech;

pub use ocr::*;
pub use speech::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("OCR engine failed: {0}")]
    Ocr(String),

    #[error("OCR engine initialization failed: {0}")]
    OcrInit(String),

    #[error("Tessdata not found at: {0}")]
    TessdataNotFound(std::path::PathBuf),

    #[error("speech service request failed: {0}")]
    Transport(String),

    #[error("audio could not be transcribed")]
    UnintelligibleAudio,
}

/// OCR engine abstraction (allows mocking for tests).
///
/// Implementations are configured for Spanish-language documents. A failure
/// is non-fatal upstream: the workflow continues with empty extracted fields.
pub trait OcrEngine {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, RecognitionError>;
}

/// Speech-to-text service abstraction.
///
/// Implementations transcribe mono WAV audio dictated in Spanish (es-ES).
/// [`RecognitionError::UnintelligibleAudio`] is a user-visible warning, not a
/// fatal error — the workflow continues with empty extracted fields.
pub trait SpeechTranscriber {
    fn transcribe(&self, audio_wav: &[u8]) -> Result<String, RecognitionError>;
}
