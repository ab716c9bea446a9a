//! CSV text ⇄ [`Document`] via the `csv` crate.
//!
//! Reading is header-unaware (`has_headers(false)`): every record comes back
//! as data and the first one is split off as the header by
//! [`Document::from_records`]. Writing uses the codec defaults: comma
//! delimiter, quotes only where needed, `\n` after every record.

use crate::document::Document;
use crate::error::Result;

/// Parse CSV bytes into a [`Document`].
///
/// Input is decoded as UTF-8, replacing invalid sequences with U+FFFD.
/// Blank lines are skipped by the codec; ragged records are accepted and
/// normalized to the header length.
pub fn parse_document(data: &[u8]) -> Result<Document> {
    let text = String::from_utf8_lossy(data);
    parse_text(&text)
}

/// Parse CSV text into a [`Document`]. A leading byte-order mark is ignored.
pub fn parse_text(text: &str) -> Result<Document> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let records = read_records(text)?;
    log::debug!("parsed {} CSV record(s)", records.len());
    Ok(Document::from_records(records))
}

/// Read every record as a row of strings.
pub fn read_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Serialize the header and all data rows back to CSV text.
pub fn write_document(doc: &Document) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut buf);
        for record in doc.records() {
            writer.write_record(record)?;
        }
        writer.flush()?;
    }
    // Every field written is a `String`, so the output is valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
