//! Keyword list loading

use crate::error::{Error, Result};
use std::path::Path;

/// Parse newline-delimited keywords, trimming each line and skipping blanks.
/// Order and duplicates are preserved.
pub fn parse_keywords(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read keywords from a UTF-8 text file
pub fn read_keywords<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::KeywordFileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let keywords = parse_keywords(&content);

    if keywords.is_empty() {
        return Err(Error::NoKeywords {
            path: path.display().to_string(),
        });
    }

    tracing::debug!(count = keywords.len(), path = %path.display(), "Loaded keywords");
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_keywords_trims_and_skips_blanks() {
        let keywords = parse_keywords("  Invoice \n\n\tTotal*\r\n   \nN/A\n");
        assert_eq!(keywords, vec!["Invoice", "Total*", "N/A"]);
    }

    #[test]
    fn test_parse_keywords_keeps_duplicates_in_order() {
        let keywords = parse_keywords("b\na\nb\n");
        assert_eq!(keywords, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_read_keywords_missing_file() {
        let result = read_keywords("/nonexistent/keywords.txt");
        assert!(matches!(result, Err(Error::KeywordFileNotFound { .. })));
    }

    #[test]
    fn test_read_keywords_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.txt");
        std::fs::write(&path, "\n   \n\n").unwrap();

        let result = read_keywords(&path);
        assert!(matches!(result, Err(Error::NoKeywords { .. })));
    }

    #[test]
    fn test_read_keywords_multi_word() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.txt");
        std::fs::write(&path, "purchase order\nnet 30\n").unwrap();

        let keywords = read_keywords(&path).unwrap();
        assert_eq!(keywords, vec!["purchase order", "net 30"]);
    }
}
