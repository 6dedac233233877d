//! Document text extraction
//!
//! An [`Extractor`] hands out one [`DocumentSession`] per worker task. The
//! session owns every stateful resource needed to read a document (for OCR:
//! a PDFium binding and a Tesseract engine) and releases them when dropped,
//! so concurrent tasks never share engine state.

use crate::error::Result;
use crate::pdf::ocr::TesseractEngine;
use crate::pdf::render::PageRenderer;
use std::path::{Path, PathBuf};

/// Default render upscaling, improves recognition on small print
pub const DEFAULT_RENDER_SCALE: f32 = 2.0;

/// Default Tesseract language
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Per-task extraction resources
pub trait DocumentSession {
    /// Raw text of the document, pages in order. Errors surface to the caller.
    fn extract(&mut self, path: &Path) -> Result<String>;
}

/// Factory for per-task sessions, shared across workers
pub trait Extractor: Send + Sync + 'static {
    type Session: DocumentSession;

    fn open_session(&self) -> Result<Self::Session>;
}

/// OCR settings
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Page render scale factor
    pub render_scale: f32,
    /// Tesseract language code(s), e.g. "eng" or "eng+deu"
    pub language: String,
    /// Custom tessdata directory (default: Tesseract's own search path)
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            render_scale: DEFAULT_RENDER_SCALE,
            language: DEFAULT_OCR_LANGUAGE.to_string(),
            tessdata_dir: None,
        }
    }
}

/// Rasterize-then-OCR extractor
#[derive(Debug, Clone, Default)]
pub struct OcrExtractor {
    config: OcrConfig,
}

impl OcrExtractor {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }
}

impl Extractor for OcrExtractor {
    type Session = OcrSession;

    fn open_session(&self) -> Result<OcrSession> {
        let renderer = PageRenderer::new(self.config.render_scale)?;
        let engine =
            TesseractEngine::new(self.config.tessdata_dir.as_deref(), &self.config.language)?;
        Ok(OcrSession { renderer, engine })
    }
}

pub struct OcrSession {
    renderer: PageRenderer,
    engine: TesseractEngine,
}

impl DocumentSession for OcrSession {
    fn extract(&mut self, path: &Path) -> Result<String> {
        let engine = &mut self.engine;
        let mut fragments = Vec::new();

        let pages = self.renderer.for_each_page(path, |_, image| {
            fragments.push(engine.recognize(image)?);
            Ok(())
        })?;

        tracing::debug!(path = %path.display(), pages, "OCR complete");
        Ok(fragments.join(" "))
    }
}

/// Collapse whitespace runs to a single space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract and normalize a document's text. Any extraction error is logged
/// and yields an empty string.
pub fn extract_document_text<S: DocumentSession + ?Sized>(session: &mut S, path: &Path) -> String {
    match session.extract(path) {
        Ok(text) => normalize_whitespace(&text),
        Err(e) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            tracing::warn!(document = %name, error = %e, "Error processing document, treating text as empty");
            String::new()
        }
    }
}
