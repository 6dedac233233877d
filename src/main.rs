//! PDF Keyword Scanner - Entry point
//!
//! OCRs every PDF in a directory and reports which keywords each one contains.

use clap::Parser;
use pdf_keyword_scanner::{
    run_scan_with_config, OcrConfig, ScanConfig, DEFAULT_MAX_WORKERS, DEFAULT_OCR_LANGUAGE,
    DEFAULT_RENDER_SCALE,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pdf-keyword-scanner", version, about)]
struct Cli {
    /// Keyword file, one term per line (`*` is a wildcard)
    #[arg(short, long, env = "PDF_SCAN_KEYWORDS", default_value = "keywords.txt")]
    keywords: PathBuf,

    /// Directory containing the PDFs to scan
    #[arg(short, long, env = "PDF_SCAN_INPUT", default_value = "inputs")]
    input: PathBuf,

    /// Spreadsheet to write
    #[arg(
        short,
        long,
        env = "PDF_SCAN_OUTPUT",
        default_value = "outputs/keyword_search_results.xlsx"
    )]
    output: PathBuf,

    /// Maximum number of documents processed at once
    #[arg(short, long, env = "PDF_SCAN_WORKERS", default_value_t = DEFAULT_MAX_WORKERS)]
    workers: usize,

    /// Only scan file names matching this glob (e.g. "invoice*.pdf")
    #[arg(short, long, env = "PDF_SCAN_PATTERN")]
    pattern: Option<String>,

    /// Sort report rows by file name instead of completion order
    #[arg(long, env = "PDF_SCAN_SORT")]
    sort: bool,

    /// Tesseract language(s), e.g. "eng" or "eng+deu"
    #[arg(long, env = "PDF_SCAN_LANG", default_value = DEFAULT_OCR_LANGUAGE)]
    lang: String,

    /// Custom tessdata directory
    #[arg(long, env = "PDF_SCAN_TESSDATA")]
    tessdata: Option<PathBuf>,

    /// Page render scale factor
    #[arg(long, env = "PDF_SCAN_SCALE", default_value_t = DEFAULT_RENDER_SCALE)]
    scale: f32,
}

impl From<Cli> for ScanConfig {
    fn from(cli: Cli) -> Self {
        Self {
            keywords_file: cli.keywords,
            input_dir: cli.input,
            output_file: cli.output,
            max_workers: cli.workers,
            pattern: cli.pattern,
            sort_rows: cli.sort,
            ocr: OcrConfig {
                render_scale: cli.scale,
                language: cli.lang,
                tessdata_dir: cli.tessdata,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_keyword_scanner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ScanConfig::from(Cli::parse());

    match run_scan_with_config(config).await {
        Ok(summary) => {
            println!("Report saved to {}", summary.output_file.display());
            if summary.failed > 0 {
                tracing::warn!(
                    failed = summary.failed,
                    "{} of {} document(s) were left out of the report",
                    summary.failed,
                    summary.documents
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Scan aborted");
            Err(e.into())
        }
    }
}
