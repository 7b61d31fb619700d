use super::{OcrEngine, RecognitionError};

/// Bundled Tesseract OCR engine, configured for Spanish documents.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct SpanishTesseract {
    tessdata_dir: std::path::PathBuf,
    lang: String,
}

#[cfg(feature = "ocr")]
impl SpanishTesseract {
    /// Initialize with a tessdata directory containing `spa.traineddata`.
    pub fn new(tessdata_dir: &std::path::Path) -> Result<Self, RecognitionError> {
        if !tessdata_dir.join("spa.traineddata").exists() {
            return Err(RecognitionError::TessdataNotFound(
                tessdata_dir.to_path_buf(),
            ));
        }

        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
            lang: "spa".to_string(),
        })
    }

    /// Override the language pack (e.g. "spa+eng" for bilingual documents).
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.lang = langs.to_string();
        self
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for SpanishTesseract {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, RecognitionError> {
        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| RecognitionError::OcrInit("Invalid tessdata path".into()))?;

        let tess = tesseract::Tesseract::new(Some(tessdata_str), Some(&self.lang))
            .map_err(|e| RecognitionError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(image_bytes)
            .map_err(|e| RecognitionError::Ocr(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| RecognitionError::Ocr(format!("{e:?}")))?;

        Ok(text)
    }
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    pub text: String,
    pub fail: bool,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            text: String::new(),
            fail: true,
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, RecognitionError> {
        if self.fail {
            return Err(RecognitionError::Ocr("mock engine failure".into()));
        }
        Ok(self.text.clone())
    }
}
