//! Error types for the PDF keyword scanner

use thiserror::Error;

/// Result type alias for the PDF keyword scanner
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the PDF keyword scanner
#[derive(Error, Debug)]
pub enum Error {
    /// Keyword file does not exist
    #[error("Keyword file not found: {path}")]
    KeywordFileNotFound { path: String },

    /// Keyword file exists but holds no usable lines
    #[error("No keywords found in {path}")]
    NoKeywords { path: String },

    /// Input directory does not exist
    #[error("Input directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// Input path is not a directory
    #[error("{path} is not a directory")]
    NotADirectory { path: String },

    /// No PDF files matched in the input directory
    #[error("No PDF files found in {directory}")]
    NoDocuments { directory: String },

    /// PDF file not found
    #[error("PDF not found: {path}")]
    PdfNotFound { path: String },

    /// File does not look like a PDF
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// PDF is password protected
    #[error("PDF is password protected")]
    PasswordRequired,

    /// PDFium error (binding, open, render)
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// Tesseract error (init, image, recognition)
    #[error("OCR error: {reason}")]
    Ocr { reason: String },

    /// Keyword or file-name filter could not be compiled
    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Match result does not cover every keyword
    #[error("Row for {document} has {got} entries, expected {expected}")]
    IncompleteRow {
        document: String,
        got: usize,
        expected: usize,
    },

    /// Worker task failed outside the extraction policy
    #[error("Task for {document} failed: {reason}")]
    Task { document: String, reason: String },

    /// Spreadsheet writer error
    #[error("Report error: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error aborts the whole run rather than a single document.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::KeywordFileNotFound { .. }
                | Error::NoKeywords { .. }
                | Error::DirectoryNotFound { .. }
                | Error::NotADirectory { .. }
                | Error::NoDocuments { .. }
                | Error::InvalidPattern { .. }
                | Error::Report(_)
        )
    }
}
