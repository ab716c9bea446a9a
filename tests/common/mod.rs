//! Common test utilities and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use csvgrid::{Document, GridEditor};

/// The sample file used throughout the tests.
pub const PEOPLE_CSV: &str = "name,age\nAlice,30\nBob,25\n";

/// Owned row from string literals.
#[must_use]
pub fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Editor with `text` loaded.
///
/// Panics if the codec rejects the input.
#[must_use]
pub fn loaded_editor(text: &str) -> GridEditor {
    let mut editor = GridEditor::new();
    editor.load(text.as_bytes()).expect("sample CSV should load");
    editor
}

/// Borrow the loaded document, panicking when the editor is empty.
#[must_use]
pub fn doc(editor: &GridEditor) -> &Document {
    editor.document().expect("editor should be loaded")
}

/// Export the editor and return the CSV text.
#[must_use]
pub fn export_text(editor: &GridEditor) -> String {
    editor.export().expect("export should succeed").text().into_owned()
}

/// Assert every data row has exactly as many cells as the header.
pub fn assert_rectangular(doc: &Document) {
    for (idx, r) in doc.rows().iter().enumerate() {
        assert_eq!(
            r.len(),
            doc.column_count(),
            "row {idx} has {} cells, header has {}",
            r.len(),
            doc.column_count()
        );
    }
}
