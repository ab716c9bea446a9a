//! `CsvGridApp`: the page exported to JavaScript.
//!
//! Owns the [`GridEditor`] plus the DOM it renders into. All handlers are
//! registered once at mount: the drop surface listens for drag/drop/click and
//! file-picker changes, the grid container listens for `input` and `click`
//! and dispatches on the target's data attributes. Re-rendering the table
//! therefore never drops a closure that is currently running.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement};

use super::dropzone::{self, Dropzone};
use super::{cell_position, table, GridAction, GridEditor, ACTION_ATTR, COL_ATTR, ROW_ATTR};
use crate::config::EditorConfig;
use crate::error::{dom_err, CsvGridError, Result};
use crate::export::download::download;

/// Everything event handlers need. Handlers hold `Weak` references to it.
pub(crate) struct AppInner {
    pub(crate) editor: RefCell<GridEditor>,
    pub(crate) page: web_sys::Document,
    pub(crate) dropzone: Dropzone,
    pub(crate) grid: HtmlElement,
}

/// The CSV grid editor mounted into a host element.
///
/// ```javascript
/// import init, { CsvGridApp } from 'csvgrid';
/// await init();
/// const app = new CsvGridApp(document.getElementById('app'), { logLevel: 'debug' });
/// ```
#[wasm_bindgen]
pub struct CsvGridApp {
    inner: Rc<AppInner>,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl CsvGridApp {
    /// Mount the editor into `root`. `config` may be `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, config: JsValue) -> std::result::Result<CsvGridApp, JsValue> {
        console_error_panic_hook::set_once();

        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| CsvGridError::Config(e.to_string()))?
        };
        config.validate()?;
        // A second app on the same page keeps the first logger.
        let _ = console_log::init_with_level(config.level()?);

        let page = root
            .owner_document()
            .ok_or_else(|| CsvGridError::Dom("root is not attached to a document".into()))?;

        let heading = page.create_element("h1").map_err(dom_err("create heading"))?;
        heading.set_text_content(Some(&config.title));
        root.append_child(&heading).map_err(dom_err("append heading"))?;

        let dropzone = Dropzone::mount(&page, &root)?;

        let grid = page
            .create_element("div")
            .map_err(dom_err("create grid"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| CsvGridError::Dom("grid is not an HtmlElement".into()))?;
        grid.set_class_name("csvgrid-grid");
        root.append_child(&grid).map_err(dom_err("append grid"))?;

        let inner = Rc::new(AppInner {
            editor: RefCell::new(GridEditor::with_config(config)),
            page,
            dropzone,
            grid,
        });
        inner.render();

        let mut closures = dropzone::bind(&inner)?;
        closures.extend(bind_grid(&inner)?);

        log::debug!("csvgrid mounted");
        Ok(CsvGridApp { inner, closures })
    }

    /// Load CSV text as if a file with this content had been dropped.
    #[wasm_bindgen(js_name = "loadText")]
    pub fn load_text(&self, text: &str) -> std::result::Result<(), JsValue> {
        self.inner.load_text(text)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = "editCell")]
    pub fn edit_cell(&self, row: usize, col: usize, value: &str) -> std::result::Result<(), JsValue> {
        self.inner.editor.borrow_mut().edit_cell(row, col, value)?;
        // Programmatic edits are not reflected by any focused input.
        self.inner.render();
        Ok(())
    }

    #[wasm_bindgen(js_name = "addRow")]
    pub fn add_row(&self) -> std::result::Result<usize, JsValue> {
        let idx = self.inner.editor.borrow_mut().add_row()?;
        self.inner.render();
        Ok(idx)
    }

    #[wasm_bindgen(js_name = "deleteRow")]
    pub fn delete_row(&self, row: usize) -> std::result::Result<(), JsValue> {
        self.inner.editor.borrow_mut().delete_row(row)?;
        self.inner.render();
        Ok(())
    }

    /// The CSV text a download would contain.
    #[wasm_bindgen(js_name = "exportText")]
    pub fn export_text(&self) -> std::result::Result<String, JsValue> {
        let file = self.inner.editor.borrow().export()?;
        Ok(file.text().into_owned())
    }

    /// Trigger the browser download of the current document.
    #[wasm_bindgen]
    pub fn download(&self) -> std::result::Result<(), JsValue> {
        self.inner.download()?;
        Ok(())
    }

    /// The current document as `{ header, rows }`, or `undefined` when empty.
    #[wasm_bindgen]
    pub fn document(&self) -> std::result::Result<JsValue, JsValue> {
        let editor = self.inner.editor.borrow();
        match editor.document() {
            Some(doc) => serde_wasm_bindgen::to_value(doc)
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}"))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(js_name = "isLoaded")]
    pub fn is_loaded(&self) -> bool {
        self.inner.editor.borrow().is_loaded()
    }
}

impl AppInner {
    pub(crate) fn load_text(&self, text: &str) -> Result<()> {
        self.editor.borrow_mut().load_text(text)?;
        self.render();
        Ok(())
    }

    /// Rebuild the table from the current state.
    pub(crate) fn render(&self) {
        let editor = self.editor.borrow();
        if let Err(e) = table::render(&self.page, &self.grid, editor.document()) {
            log::error!("render failed: {e}");
        }
    }

    fn download(&self) -> Result<()> {
        let file = self.editor.borrow().export()?;
        download(&file)
    }

    fn on_grid_input(&self, event: &Event) {
        let Some(input) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some((row, col)) = cell_position(
            input.get_attribute(ROW_ATTR).as_deref(),
            input.get_attribute(COL_ATTR).as_deref(),
        ) else {
            return;
        };
        let value = input.value();
        if let Err(e) = self.editor.borrow_mut().edit_cell(row, col, &value) {
            log::error!("edit failed: {e}");
        }
    }

    fn on_grid_click(&self, event: &Event) {
        let Some(control) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&format!("[{ACTION_ATTR}]")).ok().flatten())
        else {
            return;
        };
        let Some(action) = control.get_attribute(ACTION_ATTR).and_then(|action| {
            GridAction::from_attributes(&action, control.get_attribute(ROW_ATTR).as_deref())
        }) else {
            return;
        };

        let result = match action {
            GridAction::AddRow => self.editor.borrow_mut().add_row().map(|_| ()),
            GridAction::DeleteRow(row) => self.editor.borrow_mut().delete_row(row).map(|_| ()),
            GridAction::Download => self.download(),
        };
        match result {
            Ok(()) if action != GridAction::Download => self.render(),
            Ok(()) => {}
            Err(e) => log::error!("{action:?} failed: {e}"),
        }
    }
}

/// Delegated `input` and `click` listeners on the grid container.
fn bind_grid(inner: &Rc<AppInner>) -> Result<Vec<Closure<dyn FnMut(Event)>>> {
    let mut closures = Vec::new();

    {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Some(inner) = weak.upgrade() {
                inner.on_grid_input(&event);
            }
        }) as Box<dyn FnMut(Event)>);
        inner
            .grid
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
            .map_err(dom_err("listen input"))?;
        closures.push(closure);
    }

    {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Some(inner) = weak.upgrade() {
                inner.on_grid_click(&event);
            }
        }) as Box<dyn FnMut(Event)>);
        inner
            .grid
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_err("listen click"))?;
        closures.push(closure);
    }

    Ok(closures)
}
