//! In-memory CSV document: a header row plus data rows of text cells.
//!
//! The document has exactly four mutations (replace, edit cell, add row,
//! delete row) and one derived read (serialize, see [`crate::codec`]).
//! Every data row has as many cells as the header; rows are sized from the
//! header on construction and edits never change a row's length.

use serde::{Deserialize, Serialize};

use crate::error::{CsvGridError, Result};

/// Header + data rows. Cell values are free-form text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentParts")]
pub struct Document {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Deserialization shape; goes through [`Document::with_rows`] so documents
/// coming from JS are normalized too.
#[derive(Deserialize)]
struct DocumentParts {
    #[serde(default)]
    header: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl From<DocumentParts> for Document {
    fn from(parts: DocumentParts) -> Self {
        Document::with_rows(parts.header, parts.rows)
    }
}

impl Document {
    /// Build a document from parsed records.
    ///
    /// The first record becomes the header, the remaining records become data
    /// rows. Rows are normalized to the header's length: short rows are padded
    /// with empty strings and long rows are truncated.
    #[must_use]
    pub fn from_records(records: Vec<Vec<String>>) -> Self {
        let mut records = records.into_iter();
        let header = records.next().unwrap_or_default();
        Self::with_rows(header, records.collect())
    }

    /// Build a document from an explicit header and data rows, normalizing
    /// row lengths to the header.
    #[must_use]
    pub fn with_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = header.len();
        let mut normalized = 0usize;
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() != width {
                    normalized += 1;
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        if normalized > 0 {
            log::warn!("normalized {normalized} row(s) to {width} column(s)");
        }
        Document { header, rows }
    }

    /// Column labels.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// All data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there is neither a header nor any data row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// Replace the value at `(row, col)`. The value is stored as-is.
    pub fn edit_cell(&mut self, row: usize, col: usize, value: &str) -> Result<()> {
        let len = self.rows.len();
        let cells = self
            .rows
            .get_mut(row)
            .ok_or(CsvGridError::RowOutOfRange { row, len })?;
        let width = cells.len();
        let cell = cells
            .get_mut(col)
            .ok_or(CsvGridError::ColumnOutOfRange { col, len: width })?;
        value.clone_into(cell);
        Ok(())
    }

    /// Append a row of empty cells sized to the header. Returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(vec![String::new(); self.header.len()]);
        self.rows.len() - 1
    }

    /// Remove the row at `row`; later rows shift up by one.
    pub fn delete_row(&mut self, row: usize) -> Result<Vec<String>> {
        if row >= self.rows.len() {
            return Err(CsvGridError::RowOutOfRange {
                row,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(row))
    }

    /// Header followed by every data row, in order.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn people() -> Document {
        Document::from_records(vec![
            strings(&["name", "age"]),
            strings(&["Alice", "30"]),
            strings(&["Bob", "25"]),
        ])
    }

    #[test]
    fn test_first_record_is_header() {
        let doc = people();
        assert_eq!(doc.header(), strings(&["name", "age"]).as_slice());
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.cell(1, 0), Some("Bob"));
    }

    #[test]
    fn test_no_records_gives_empty_document() {
        let doc = Document::from_records(Vec::new());
        assert!(doc.is_empty());
        assert_eq!(doc.column_count(), 0);
        assert_eq!(doc.row_count(), 0);
    }

    #[test]
    fn test_ragged_rows_are_normalized() {
        let doc = Document::from_records(vec![
            strings(&["a", "b", "c"]),
            strings(&["1"]),
            strings(&["1", "2", "3", "4"]),
        ]);
        assert_eq!(doc.row(0).unwrap(), strings(&["1", "", ""]).as_slice());
        assert_eq!(doc.row(1).unwrap(), strings(&["1", "2", "3"]).as_slice());
    }

    #[test]
    fn test_add_row_sized_to_header() {
        let mut doc = people();
        let idx = doc.add_row();
        assert_eq!(idx, 2);
        assert_eq!(doc.row(2).unwrap(), strings(&["", ""]).as_slice());
        assert_eq!(doc.row(0).unwrap(), strings(&["Alice", "30"]).as_slice());
    }

    #[test]
    fn test_add_row_with_empty_header() {
        let mut doc = Document::default();
        doc.add_row();
        assert_eq!(doc.row_count(), 1);
        assert!(doc.row(0).unwrap().is_empty());
    }

    #[test]
    fn test_delete_row_shifts_following_rows() {
        let mut doc = people();
        let removed = doc.delete_row(0).unwrap();
        assert_eq!(removed, strings(&["Alice", "30"]));
        assert_eq!(doc.rows(), &[strings(&["Bob", "25"])]);
    }

    #[test]
    fn test_delete_row_out_of_range() {
        let mut doc = people();
        let err = doc.delete_row(2).unwrap_err();
        assert!(matches!(err, CsvGridError::RowOutOfRange { row: 2, len: 2 }));
        assert_eq!(doc, people());
    }

    #[test]
    fn test_edit_cell_keeps_value_verbatim() {
        let mut doc = people();
        doc.edit_cell(0, 1, "  31 ").unwrap();
        assert_eq!(doc.cell(0, 1), Some("  31 "));
    }

    #[test]
    fn test_edit_cell_out_of_range() {
        let mut doc = people();
        assert!(matches!(
            doc.edit_cell(5, 0, "x"),
            Err(CsvGridError::RowOutOfRange { row: 5, len: 2 })
        ));
        assert!(matches!(
            doc.edit_cell(0, 2, "x"),
            Err(CsvGridError::ColumnOutOfRange { col: 2, len: 2 })
        ));
        assert_eq!(doc, people());
    }

    #[test]
    fn test_records_starts_with_header() {
        let doc = people();
        let records: Vec<&[String]> = doc.records().collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], doc.header());
    }

    #[test]
    fn test_deserialize_normalizes_rows() {
        let doc: Document =
            serde_json::from_str(r#"{"header":["a","b"],"rows":[["1"],["1","2"]]}"#).unwrap();
        assert_eq!(doc.row(0).unwrap(), strings(&["1", ""]).as_slice());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let json = serde_json::to_value(people()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "header": ["name", "age"],
                "rows": [["Alice", "30"], ["Bob", "25"]],
            })
        );
    }
}
