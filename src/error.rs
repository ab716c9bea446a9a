//! Structured error types for csvgrid.

/// All errors that can occur while loading, editing or exporting a grid.
#[derive(Debug, thiserror::Error)]
pub enum CsvGridError {
    /// CSV codec error (malformed input or writer failure).
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation that needs a document was called before any file was loaded.
    #[error("no file loaded")]
    NotLoaded,

    /// Row index does not address an existing data row.
    #[error("row {row} out of range (document has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    /// Column index does not address an existing column.
    #[error("column {col} out of range (document has {len} columns)")]
    ColumnOutOfRange { col: usize, len: usize },

    /// Invalid editor configuration.
    #[error("Invalid config: {0}")]
    Config(String),

    /// DOM manipulation failed (element creation, listener registration, ...).
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CsvGridError>;

#[cfg(target_arch = "wasm32")]
impl From<CsvGridError> for wasm_bindgen::JsValue {
    fn from(e: CsvGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

/// Wrap a JS exception raised by a DOM call.
#[cfg(target_arch = "wasm32")]
pub(crate) fn dom_err(context: &str) -> impl Fn(wasm_bindgen::JsValue) -> CsvGridError + '_ {
    move |e| CsvGridError::Dom(format!("{context}: {e:?}"))
}
