//! CSV export pipeline.
//!
//! Serializes the whole document (header first) with the codec defaults and
//! packages it with the file name and MIME type the download uses. The
//! browser side lives in [`download`].

#[cfg(target_arch = "wasm32")]
pub(crate) mod download;

use crate::codec::write_document;
use crate::config::{EditorConfig, DEFAULT_CONTENT_TYPE, DEFAULT_EXPORT_FILE_NAME};
use crate::document::Document;
use crate::error::Result;

/// A generated file, ready to hand to the browser's download mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// The body as text (always UTF-8).
    #[must_use]
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Export with the default name (`exported_data.csv`) and content type.
pub fn export_csv(doc: &Document) -> Result<ExportFile> {
    build(doc, DEFAULT_EXPORT_FILE_NAME, DEFAULT_CONTENT_TYPE)
}

/// Export using the name and content type from `config`.
pub fn export_with_config(doc: &Document, config: &EditorConfig) -> Result<ExportFile> {
    build(doc, &config.export_file_name, &config.content_type)
}

fn build(doc: &Document, file_name: &str, content_type: &str) -> Result<ExportFile> {
    let text = write_document(doc)?;
    log::debug!(
        "exported {} row(s) as {file_name} ({} bytes)",
        doc.row_count(),
        text.len()
    );
    Ok(ExportFile {
        file_name: file_name.to_string(),
        content_type: content_type.to_string(),
        bytes: text.into_bytes(),
    })
}
