//! csvgrid - CSV grid editor for the web
//!
//! Drop a CSV file on the page, edit it as a table and download it again:
//! - Parsing and writing through the `csv` crate (header split off manually)
//! - Add rows, delete rows, edit any cell as plain text
//! - Download as `exported_data.csv` (`text/csv;charset=utf-8;`)
//! - Everything stays in page memory
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { CsvGridApp } from 'csvgrid';
//! await init();
//! const app = new CsvGridApp(document.getElementById('app'));
//! ```
//!
//! The document model, codec and export are target independent and usable
//! from Rust directly:
//!
//! ```
//! use csvgrid::GridEditor;
//!
//! let mut editor = GridEditor::new();
//! editor.load(b"name,age\nAlice,30\nBob,25\n").unwrap();
//! editor.add_row().unwrap();
//! editor.delete_row(0).unwrap();
//! assert_eq!(editor.export().unwrap().text(), "name,age\nBob,25\n,\n");
//! ```

pub mod codec;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod export;

use wasm_bindgen::prelude::*;

pub use config::EditorConfig;
pub use document::Document;
#[cfg(target_arch = "wasm32")]
pub use editor::CsvGridApp;
pub use editor::{EditorState, GridEditor};
pub use error::{CsvGridError, Result};
pub use export::ExportFile;

/// Parse CSV bytes and return a JSON string `{ "header": [...], "rows": [[...]] }`
///
/// # Errors
/// Returns an error if the codec rejects the input.
#[wasm_bindgen]
pub fn parse_csv(data: &[u8]) -> std::result::Result<String, JsValue> {
    let doc = codec::parse_document(data).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&doc)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Parse CSV bytes and return the document as a `JsValue`
///
/// This is more efficient than `parse_csv` when the result will be
/// used directly in JavaScript.
///
/// # Errors
/// Returns an error if the codec rejects the input.
#[wasm_bindgen]
pub fn parse_csv_to_js(data: &[u8]) -> std::result::Result<JsValue, JsValue> {
    let doc = codec::parse_document(data).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&doc)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Serialize a `{ header, rows }` object back to CSV text.
///
/// Rows are normalized to the header length before writing.
///
/// # Errors
/// Returns an error if `doc` does not have the expected shape.
#[wasm_bindgen]
pub fn export_csv(doc: JsValue) -> std::result::Result<String, JsValue> {
    let doc: Document = serde_wasm_bindgen::from_value(doc)
        .map_err(|e| JsValue::from_str(&format!("Deserialization error: {e}")))?;

    codec::write_document(&doc).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
