//! Field extraction — modality-specific heuristics over recognized text.
//!
//! Each strategy is a pure, deterministic function of the input text (no
//! state, no I/O). The heuristics are deliberately naive pattern matches kept
//! behind the [`ExtractionStrategy`] seam so a structured extractor can
//! replace them later without touching callers.

pub mod audio_text;
pub mod image_text;

pub use audio_text::AudioTextStrategy;
pub use image_text::ImageTextStrategy;

use crate::models::{CaptureMethod, ExtractedFields};

/// Turns raw recognized text into structured patient fields.
///
/// Runs on the final, possibly user-corrected text — never directly on the
/// recognizer output. Missing fields come back as empty strings, never errors.
pub trait ExtractionStrategy {
    fn extract(&self, text: &str) -> ExtractedFields;
}

/// Resolve the strategy for a capture method.
pub fn strategy_for(method: CaptureMethod) -> &'static dyn ExtractionStrategy {
    match method {
        CaptureMethod::Image => &ImageTextStrategy,
        CaptureMethod::Audio => &AudioTextStrategy,
    }
}
