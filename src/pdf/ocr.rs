//! Tesseract OCR engine wrapper

use crate::error::{Error, Result};
use image::RgbImage;
use std::path::Path;
use tesseract::Tesseract;

const RGB_BYTES_PER_PIXEL: i32 = 3;

/// One Tesseract instance. Not shared between threads; each extraction
/// session owns its own engine.
pub struct TesseractEngine {
    // The tesseract API consumes the handle on every step, so it is taken
    // out and put back around each page
    api: Option<Tesseract>,
    language: String,
}

impl TesseractEngine {
    /// Initialize Tesseract for `language` (e.g. "eng"), optionally with a
    /// custom tessdata directory
    pub fn new(tessdata_dir: Option<&Path>, language: &str) -> Result<Self> {
        let datapath = match tessdata_dir {
            Some(dir) => Some(dir.to_str().ok_or_else(|| Error::Ocr {
                reason: format!("tessdata path is not valid UTF-8: {}", dir.display()),
            })?),
            None => None,
        };

        let api = Tesseract::new(datapath, Some(language)).map_err(|e| Error::Ocr {
            reason: format!("Failed to initialize Tesseract ({}): {}", language, e),
        })?;

        Ok(Self {
            api: Some(api),
            language: language.to_string(),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Recognize the text of one rendered page. Bounding boxes and confidence
    /// scores are discarded.
    pub fn recognize(&mut self, image: &RgbImage) -> Result<String> {
        let api = self.api.take().ok_or_else(|| Error::Ocr {
            reason: "Tesseract engine unavailable after an earlier failure".to_string(),
        })?;

        let width = i32::try_from(image.width()).map_err(|_| Error::Ocr {
            reason: format!("Image width {} too large", image.width()),
        })?;
        let height = i32::try_from(image.height()).map_err(|_| Error::Ocr {
            reason: format!("Image height {} too large", image.height()),
        })?;

        let mut api = api
            .set_frame(
                image.as_raw(),
                width,
                height,
                RGB_BYTES_PER_PIXEL,
                width * RGB_BYTES_PER_PIXEL,
            )
            .map_err(|e| Error::Ocr {
                reason: format!("Failed to set image: {}", e),
            })?
            .recognize()
            .map_err(|e| Error::Ocr {
                reason: format!("Recognition failed: {}", e),
            })?;

        let text = api.get_text().map_err(|e| Error::Ocr {
            reason: format!("Failed to read recognized text: {}", e),
        })?;

        self.api = Some(api);
        Ok(text)
    }
}
