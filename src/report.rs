//! Result aggregation and spreadsheet output

use crate::error::{Error, Result};
use crate::keywords::MatchResult;
use rust_xlsxwriter::{ColNum, RowNum, Workbook, XlsxError};
use std::path::Path;
use std::sync::Arc;

/// Worksheet name in the generated workbook
pub const SHEET_NAME: &str = "Keyword Search Results";

/// Header of the first column
pub const DOCUMENT_HEADER: &str = "Document";

const YES: &str = "YES";
const NO: &str = "NO";

/// One report row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub document: String,
    pub result: MatchResult,
}

/// Documents × keywords matrix, rows kept in insertion order
#[derive(Debug, Clone)]
pub struct ReportTable {
    keywords: Arc<[String]>,
    rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn new(keywords: Arc<[String]>) -> Self {
        Self {
            keywords,
            rows: Vec::new(),
        }
    }

    /// Add a document's result. Rejects results that do not cover every
    /// keyword; a repeated document name replaces the earlier row in place.
    pub fn insert(&mut self, document: impl Into<String>, result: MatchResult) -> Result<()> {
        let document = document.into();

        if result.len() != self.keywords.len() || result.keywords() != &*self.keywords {
            return Err(Error::IncompleteRow {
                document,
                got: result.len(),
                expected: self.keywords.len(),
            });
        }

        match self.rows.iter_mut().find(|r| r.document == document) {
            Some(row) => row.result = result,
            None => self.rows.push(ReportRow { document, result }),
        }

        Ok(())
    }

    pub fn get(&self, document: &str) -> Option<&MatchResult> {
        self.rows
            .iter()
            .find(|r| r.document == document)
            .map(|r| &r.result)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn document_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.document.as_str()).collect()
    }

    /// Order rows by document name
    pub fn sort_by_document(&mut self) {
        self.rows.sort_by(|a, b| a.document.cmp(&b.document));
    }
}

fn column(index: usize) -> std::result::Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn row(index: usize) -> std::result::Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Write the table as an `.xlsx` workbook, replacing any existing file.
/// The parent directory is created if missing.
pub fn write_report<P: AsRef<Path>>(table: &ReportTable, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    worksheet.write_string(0, 0, DOCUMENT_HEADER)?;
    for (i, keyword) in table.keywords().iter().enumerate() {
        worksheet.write_string(0, column(i + 1)?, keyword.as_str())?;
    }

    for (r, entry) in table.rows().iter().enumerate() {
        let row_num = row(r + 1)?;
        worksheet.write_string(row_num, 0, entry.document.as_str())?;
        for (i, &hit) in entry.result.hits().iter().enumerate() {
            worksheet.write_string(row_num, column(i + 1)?, if hit { YES } else { NO })?;
        }
    }

    workbook.save(path)?;

    tracing::debug!(rows = table.len(), path = %path.display(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Reader, Xlsx};
    use pretty_assertions::assert_eq;

    fn keywords(list: &[&str]) -> Arc<[String]> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into()
    }

    fn read_sheet(path: &Path) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).expect("open workbook");
        let range = workbook.worksheet_range(SHEET_NAME).expect("sheet exists");
        range
            .rows()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_insert_rejects_partial_row() {
        let kw = keywords(&["a", "b"]);
        let mut table = ReportTable::new(Arc::clone(&kw));
        let partial = MatchResult::new(keywords(&["a"]), vec![true]);

        let result = table.insert("doc.pdf", partial);
        assert!(matches!(
            result,
            Err(Error::IncompleteRow {
                got: 1,
                expected: 2,
                ..
            })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_replaces_same_document() {
        let kw = keywords(&["a"]);
        let mut table = ReportTable::new(Arc::clone(&kw));
        table
            .insert("doc.pdf", MatchResult::new(Arc::clone(&kw), vec![false]))
            .unwrap();
        table.insert("other.pdf", MatchResult::none(Arc::clone(&kw))).unwrap();
        table
            .insert("doc.pdf", MatchResult::new(Arc::clone(&kw), vec![true]))
            .unwrap();

        assert_eq!(table.document_names(), vec!["doc.pdf", "other.pdf"]);
        assert_eq!(table.get("doc.pdf").and_then(|r| r.get("a")), Some(true));
    }

    #[test]
    fn test_sort_by_document() {
        let kw = keywords(&["a"]);
        let mut table = ReportTable::new(Arc::clone(&kw));
        for name in ["c.pdf", "a.pdf", "b.pdf"] {
            table.insert(name, MatchResult::none(Arc::clone(&kw))).unwrap();
        }
        table.sort_by_document();
        assert_eq!(table.document_names(), vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_write_report_layout() {
        let kw = keywords(&["Invoice", "Total*", "N/A"]);
        let mut table = ReportTable::new(Arc::clone(&kw));
        table
            .insert(
                "first.pdf",
                MatchResult::new(Arc::clone(&kw), vec![true, true, false]),
            )
            .unwrap();
        table
            .insert("second.pdf", MatchResult::none(Arc::clone(&kw)))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs").join("report.xlsx");
        write_report(&table, &path).unwrap();

        assert_eq!(
            read_sheet(&path),
            vec![
                vec!["Document", "Invoice", "Total*", "N/A"],
                vec!["first.pdf", "YES", "YES", "NO"],
                vec!["second.pdf", "NO", "NO", "NO"],
            ]
        );
    }

    #[test]
    fn test_write_report_overwrites() {
        let kw = keywords(&["a"]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        std::fs::write(&path, b"stale").unwrap();

        let mut table = ReportTable::new(Arc::clone(&kw));
        table
            .insert("x.pdf", MatchResult::new(Arc::clone(&kw), vec![true]))
            .unwrap();
        write_report(&table, &path).unwrap();

        assert_eq!(
            read_sheet(&path),
            vec![vec!["Document", "a"], vec!["x.pdf", "YES"]]
        );
    }

    #[test]
    fn test_write_report_header_only() {
        let table = ReportTable::new(keywords(&["a", "b"]));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_report(&table, &path).unwrap();

        assert_eq!(read_sheet(&path), vec![vec!["Document", "a", "b"]]);
    }
}
