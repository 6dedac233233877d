//! PDF processing layer
//!
//! Page rasterization with PDFium, recognition with Tesseract, and the
//! per-task extraction sessions built on top of them.

mod extract;
mod ocr;
mod render;

pub use extract::{
    extract_document_text, normalize_whitespace, DocumentSession, Extractor, OcrConfig,
    OcrExtractor, OcrSession, DEFAULT_OCR_LANGUAGE, DEFAULT_RENDER_SCALE,
};
pub use ocr::TesseractEngine;
pub use render::{check_pdf_header, PageRenderer};
