//! Input PDF discovery

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A PDF queued for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    /// File name, used as the report row label
    pub name: String,
}

impl Document {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

/// List `*.pdf` files directly inside `dir` (non-recursive), sorted by path.
/// `pattern` is an optional glob applied to file names, e.g. `invoice*.pdf`.
pub fn discover_pdfs<P: AsRef<Path>>(dir: P, pattern: Option<&str>) -> Result<Vec<Document>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        return Err(Error::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.display().to_string(),
        });
    }

    let pattern = match pattern {
        Some(p) => Some(glob::Pattern::new(p).map_err(|e| Error::InvalidPattern {
            pattern: p.to_string(),
            reason: e.to_string(),
        })?),
        None => None,
    };

    let mut documents = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            continue;
        }

        let document = Document::new(path);
        if let Some(ref pat) = pattern {
            if !pat.matches(&document.name) {
                continue;
            }
        }

        documents.push(document);
    }

    documents.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(documents)
}
