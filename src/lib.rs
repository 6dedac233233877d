//! PDF Keyword Scanner Library
//!
//! Batch OCR over a directory of PDFs, checked against a keyword list:
//! - `keywords`: keyword loading and wildcard-aware, word-boundary matching
//! - `pdf`: page rendering (PDFium), OCR (Tesseract) and per-task extraction sessions
//! - `source`: input PDF discovery
//! - `scanner`: bounded concurrent batch driver
//! - `report`: result table and `.xlsx` output

pub mod error;
pub mod keywords;
pub mod pdf;
pub mod report;
pub mod scanner;
pub mod source;

pub use error::{Error, Result};
pub use keywords::{KeywordMatcher, MatchResult};
pub use pdf::{
    DocumentSession, Extractor, OcrConfig, OcrExtractor, DEFAULT_OCR_LANGUAGE,
    DEFAULT_RENDER_SCALE,
};
pub use report::{write_report, ReportTable};
pub use scanner::{
    run_scan, run_scan_with_config, run_scan_with_extractor, scan_documents, ScanConfig,
    ScanSummary, DEFAULT_MAX_WORKERS,
};
pub use source::Document;
