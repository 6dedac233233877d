//! Batch driver: keyword loading, document discovery, bounded fan-out and report output

use crate::error::{Error, Result};
use crate::keywords::{read_keywords, KeywordMatcher, MatchResult};
use crate::pdf::{extract_document_text, Extractor, OcrConfig, OcrExtractor};
use crate::report::{write_report, ReportTable};
use crate::source::{discover_pdfs, Document};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Upper bound on concurrently processed documents
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Newline-delimited keyword file
    pub keywords_file: PathBuf,
    /// Directory holding the input PDFs (non-recursive)
    pub input_dir: PathBuf,
    /// Spreadsheet to write
    pub output_file: PathBuf,
    /// Maximum concurrent documents (default: 4)
    pub max_workers: usize,
    /// Optional glob filter on file names
    pub pattern: Option<String>,
    /// Sort report rows by document name instead of completion order
    pub sort_rows: bool,
    /// OCR settings
    pub ocr: OcrConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            keywords_file: PathBuf::from("keywords.txt"),
            input_dir: PathBuf::from("inputs"),
            output_file: PathBuf::from("outputs/keyword_search_results.xlsx"),
            max_workers: DEFAULT_MAX_WORKERS,
            pattern: None,
            sort_rows: false,
            ocr: OcrConfig::default(),
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub output_file: PathBuf,
    /// Documents discovered
    pub documents: usize,
    /// Rows written to the report
    pub reported: usize,
    /// Documents omitted because their task failed
    pub failed: usize,
}

/// Pool size for `documents` inputs: `max_workers` capped by the document
/// count, never below one
pub fn worker_count(max_workers: usize, documents: usize) -> usize {
    max_workers.min(documents).max(1)
}

/// Full pipeline for one document, run on a blocking thread. The session is
/// acquired here and dropped on return.
fn process_document<E: Extractor>(
    extractor: &E,
    matcher: &KeywordMatcher,
    document: &Document,
) -> Result<MatchResult> {
    tracing::info!("Processing {}...", document.name);

    let mut session = extractor.open_session()?;
    let text = extract_document_text(&mut session, &document.path);
    Ok(matcher.match_text(&text))
}

fn join_reason(err: tokio::task::JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        if let Some(msg) = payload.downcast_ref::<&str>() {
            format!("worker panicked: {}", msg)
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            format!("worker panicked: {}", msg)
        } else {
            "worker panicked".to_string()
        }
    } else {
        format!("worker cancelled: {}", err)
    }
}

/// Extract and match every document with at most `max_workers` running at
/// once. Rows are collected in completion order; documents whose task fails
/// are logged and left out.
pub async fn scan_documents<E: Extractor>(
    extractor: Arc<E>,
    matcher: Arc<KeywordMatcher>,
    documents: Vec<Document>,
    max_workers: usize,
) -> ReportTable {
    let workers = worker_count(max_workers, documents.len());
    tracing::debug!(documents = documents.len(), workers, "Starting batch");

    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();
    let mut names = HashMap::new();

    for document in documents {
        let extractor = Arc::clone(&extractor);
        let matcher = Arc::clone(&matcher);
        let semaphore = Arc::clone(&semaphore);
        let label = document.name.clone();

        let handle = tasks.spawn(async move {
            let name = document.name.clone();
            let permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    return (
                        name.clone(),
                        Err(Error::Task {
                            document: name,
                            reason: e.to_string(),
                        }),
                    )
                }
            };

            let outcome = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                process_document(extractor.as_ref(), &matcher, &document)
            })
            .await
            .map_err(|e| Error::Task {
                document: name.clone(),
                reason: join_reason(e),
            })
            .and_then(|r| r);

            (name, outcome)
        });
        names.insert(handle.id(), label);
    }

    let mut table = ReportTable::new(Arc::clone(matcher.keywords()));

    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_, (name, Ok(result)))) => {
                if let Err(e) = table.insert(name.clone(), result) {
                    tracing::error!(document = %name, error = %e, "Error processing {}", name);
                }
            }
            Ok((_, (name, Err(e)))) => {
                tracing::error!(document = %name, error = %e, "Error processing {}", name);
            }
            Err(e) => {
                let name = names
                    .get(&e.id())
                    .cloned()
                    .unwrap_or_else(|| "<unknown>".to_string());
                tracing::error!(document = %name, error = %e, "Error processing {}", name);
            }
        }
    }

    table
}

/// Run the scan with the default configuration
pub async fn run_scan() -> Result<ScanSummary> {
    run_scan_with_config(ScanConfig::default()).await
}

/// Run the scan with Tesseract OCR
pub async fn run_scan_with_config(config: ScanConfig) -> Result<ScanSummary> {
    let extractor = OcrExtractor::new(config.ocr.clone());
    run_scan_with_extractor(&config, extractor).await
}

/// Run the scan with any extractor: load keywords, discover documents,
/// fan out, then write the report
pub async fn run_scan_with_extractor<E: Extractor>(
    config: &ScanConfig,
    extractor: E,
) -> Result<ScanSummary> {
    let keywords = read_keywords(&config.keywords_file)?;
    let matcher = Arc::new(KeywordMatcher::new(&keywords)?);

    let documents = discover_pdfs(&config.input_dir, config.pattern.as_deref())?;
    if documents.is_empty() {
        return Err(Error::NoDocuments {
            directory: config.input_dir.display().to_string(),
        });
    }

    tracing::info!(
        keywords = keywords.len(),
        documents = documents.len(),
        "Scanning {} PDF file(s)",
        documents.len()
    );

    let total = documents.len();
    let mut table =
        scan_documents(Arc::new(extractor), matcher, documents, config.max_workers).await;

    if config.sort_rows {
        table.sort_by_document();
    }

    write_report(&table, &config.output_file)?;
    tracing::info!("Report saved to {}", config.output_file.display());

    Ok(ScanSummary {
        output_file: config.output_file.clone(),
        documents: total,
        reported: table.len(),
        failed: total.saturating_sub(table.len()),
    })
}
