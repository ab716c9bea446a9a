//! Grid editor: the load / edit / add / delete / export state machine.
//!
//! `GridEditor` owns the document and is target independent, so every
//! operation is testable natively. On wasm32, [`CsvGridApp`] mounts it into
//! the page:
//! - a drop surface that reads the chosen file (see `dropzone`)
//! - an editable table with per-row delete and Add Row / Download CSV buttons
//!   (see `table`)

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dropzone;
#[cfg(target_arch = "wasm32")]
mod table;

#[cfg(target_arch = "wasm32")]
pub use app::CsvGridApp;

use crate::codec;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::{CsvGridError, Result};
use crate::export::{self, ExportFile};

/// Observable editor state. There is no way back to `Empty` once a file has
/// been loaded; loading another file replaces the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    /// No file loaded: only the drop surface is shown.
    #[default]
    Empty,
    /// A file has been parsed: the grid and action buttons are shown.
    Loaded(Document),
}

/// Attribute naming the button action on grid controls.
pub const ACTION_ATTR: &str = "data-action";
/// Attribute carrying a data row index on grid controls.
pub const ROW_ATTR: &str = "data-row";
/// Attribute carrying a column index on cell inputs.
pub const COL_ATTR: &str = "data-col";

/// A button press inside the grid, decoded from the control's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    AddRow,
    DeleteRow(usize),
    Download,
}

impl GridAction {
    pub const ADD_ROW: &'static str = "add-row";
    pub const DELETE_ROW: &'static str = "delete-row";
    pub const DOWNLOAD: &'static str = "download";

    /// Decode `data-action` (and `data-row` for deletes).
    #[must_use]
    pub fn from_attributes(action: &str, row: Option<&str>) -> Option<Self> {
        match action {
            Self::ADD_ROW => Some(GridAction::AddRow),
            Self::DELETE_ROW => row?.parse().ok().map(GridAction::DeleteRow),
            Self::DOWNLOAD => Some(GridAction::Download),
            _ => None,
        }
    }
}

/// Decode the `(row, col)` of a cell input from its attributes.
#[must_use]
pub fn cell_position(row: Option<&str>, col: Option<&str>) -> Option<(usize, usize)> {
    Some((row?.parse().ok()?, col?.parse().ok()?))
}

/// The editor behind the page.
#[derive(Debug, Default)]
pub struct GridEditor {
    state: EditorState,
    config: EditorConfig,
}

impl GridEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        GridEditor {
            state: EditorState::Empty,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, EditorState::Loaded(_))
    }

    /// The loaded document, if any.
    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        match &self.state {
            EditorState::Loaded(doc) => Some(doc),
            EditorState::Empty => None,
        }
    }

    fn document_mut(&mut self) -> Result<&mut Document> {
        match &mut self.state {
            EditorState::Loaded(doc) => Ok(doc),
            EditorState::Empty => Err(CsvGridError::NotLoaded),
        }
    }

    /// Load raw file bytes, replacing whatever was loaded before.
    pub fn load(&mut self, data: &[u8]) -> Result<&Document> {
        self.replace(codec::parse_document(data)?);
        self.document().ok_or(CsvGridError::NotLoaded)
    }

    /// Load file text, replacing whatever was loaded before.
    pub fn load_text(&mut self, text: &str) -> Result<&Document> {
        self.replace(codec::parse_text(text)?);
        self.document().ok_or(CsvGridError::NotLoaded)
    }

    /// Replace the document unconditionally and enter `Loaded`.
    pub fn replace(&mut self, doc: Document) {
        log::info!(
            "loaded {} column(s), {} row(s)",
            doc.column_count(),
            doc.row_count()
        );
        self.state = EditorState::Loaded(doc);
    }

    /// Replace the value at `(row, col)`.
    pub fn edit_cell(&mut self, row: usize, col: usize, value: &str) -> Result<()> {
        self.document_mut()?.edit_cell(row, col, value)?;
        log::debug!("edited cell ({row}, {col})");
        Ok(())
    }

    /// Append an empty row sized to the header. Returns its index.
    pub fn add_row(&mut self) -> Result<usize> {
        let idx = self.document_mut()?.add_row();
        log::debug!("added row {idx}");
        Ok(idx)
    }

    /// Remove a row; later rows shift up.
    pub fn delete_row(&mut self, row: usize) -> Result<Vec<String>> {
        let removed = self.document_mut()?.delete_row(row)?;
        log::debug!("deleted row {row}");
        Ok(removed)
    }

    /// Serialize header + rows into the configured download file.
    pub fn export(&self) -> Result<ExportFile> {
        let doc = self.document().ok_or(CsvGridError::NotLoaded)?;
        export::export_with_config(doc, &self.config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const PEOPLE: &str = "name,age\nAlice,30\nBob,25\n";

    #[test]
    fn test_starts_empty() {
        let editor = GridEditor::new();
        assert_eq!(editor.state(), &EditorState::Empty);
        assert!(editor.document().is_none());
    }

    #[test]
    fn test_operations_need_a_document() {
        let mut editor = GridEditor::new();
        assert!(matches!(editor.add_row(), Err(CsvGridError::NotLoaded)));
        assert!(matches!(editor.delete_row(0), Err(CsvGridError::NotLoaded)));
        assert!(matches!(
            editor.edit_cell(0, 0, "x"),
            Err(CsvGridError::NotLoaded)
        ));
        assert!(matches!(editor.export(), Err(CsvGridError::NotLoaded)));
    }

    #[test]
    fn test_load_enters_loaded() {
        let mut editor = GridEditor::new();
        editor.load(PEOPLE.as_bytes()).unwrap();
        assert!(editor.is_loaded());
        assert_eq!(editor.document().unwrap().row_count(), 2);
    }

    #[test]
    fn test_empty_file_still_loads() {
        let mut editor = GridEditor::new();
        let doc = editor.load(b"").unwrap();
        assert!(doc.is_empty());
        assert!(editor.is_loaded());
    }

    #[test]
    fn test_second_load_replaces_document() {
        let mut editor = GridEditor::new();
        editor.load_text(PEOPLE).unwrap();
        editor.add_row().unwrap();
        editor.load_text("x\n1\n").unwrap();
        let doc = editor.document().unwrap();
        assert_eq!(doc.header(), ["x"]);
        assert_eq!(doc.row_count(), 1);
    }

    #[test]
    fn test_grid_actions_from_attributes() {
        assert_eq!(
            GridAction::from_attributes("add-row", None),
            Some(GridAction::AddRow)
        );
        assert_eq!(
            GridAction::from_attributes("delete-row", Some("3")),
            Some(GridAction::DeleteRow(3))
        );
        assert_eq!(
            GridAction::from_attributes("download", None),
            Some(GridAction::Download)
        );
        assert_eq!(GridAction::from_attributes("delete-row", None), None);
        assert_eq!(GridAction::from_attributes("delete-row", Some("-1")), None);
        assert_eq!(GridAction::from_attributes("rename", None), None);
    }

    #[test]
    fn test_cell_position() {
        assert_eq!(cell_position(Some("2"), Some("0")), Some((2, 0)));
        assert_eq!(cell_position(Some("2"), None), None);
        assert_eq!(cell_position(Some("x"), Some("0")), None);
    }

    #[test]
    fn test_export_uses_config() {
        let config = EditorConfig {
            export_file_name: "people.csv".into(),
            ..EditorConfig::default()
        };
        let mut editor = GridEditor::with_config(config);
        editor.load_text(PEOPLE).unwrap();
        let file = editor.export().unwrap();
        assert_eq!(file.file_name, "people.csv");
        assert_eq!(file.text(), PEOPLE);
    }
}
