//! Drop surface: a dashed region with a hidden file picker.
//!
//! Dropping a file or picking one through the input reads it with
//! `File.text()` and loads the result. Only the first file is used. The read
//! is the only asynchronous step; there is no cancellation or retry, a failed
//! read is logged and the editor keeps its current state.

use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, Event, File, HtmlElement, HtmlInputElement};

use super::app::AppInner;
use crate::error::{dom_err, CsvGridError, Result};

pub(crate) const PROMPT_IDLE: &str = "Drag 'n' drop a CSV file here, or click to select a file";
pub(crate) const PROMPT_ACTIVE: &str = "Drop the CSV file here ...";

/// Elements of the drop surface.
pub(crate) struct Dropzone {
    pub(crate) area: HtmlElement,
    pub(crate) input: HtmlInputElement,
    pub(crate) prompt: HtmlElement,
}

impl Dropzone {
    /// Create the drop surface and append it to `root`.
    pub(crate) fn mount(page: &web_sys::Document, root: &HtmlElement) -> Result<Self> {
        let area = create::<HtmlElement>(page, "div")?;
        area.set_class_name("csvgrid-dropzone");
        let style = area.style();
        let _ = style.set_property("border", "2px dashed #d1d5db");
        let _ = style.set_property("border-radius", "8px");
        let _ = style.set_property("padding", "2rem");
        let _ = style.set_property("margin-bottom", "1rem");
        let _ = style.set_property("text-align", "center");
        let _ = style.set_property("cursor", "pointer");

        let input = create::<HtmlInputElement>(page, "input")?;
        input.set_type("file");
        let _ = input.style().set_property("display", "none");

        let prompt = create::<HtmlElement>(page, "p")?;
        prompt.set_text_content(Some(PROMPT_IDLE));

        area.append_child(&input).map_err(dom_err("append file input"))?;
        area.append_child(&prompt).map_err(dom_err("append prompt"))?;
        root.append_child(&area).map_err(dom_err("append dropzone"))?;

        Ok(Dropzone {
            area,
            input,
            prompt,
        })
    }

    fn set_drag_active(&self, active: bool) {
        let text = if active { PROMPT_ACTIVE } else { PROMPT_IDLE };
        self.prompt.set_text_content(Some(text));
    }
}

fn create<T: JsCast>(page: &web_sys::Document, tag: &str) -> Result<T> {
    page.create_element(tag)
        .map_err(dom_err("create element"))?
        .dyn_into::<T>()
        .map_err(|_| CsvGridError::Dom(format!("<{tag}> has unexpected type")))
}

/// Register drag, drop, click and picker listeners on the drop surface.
pub(crate) fn bind(inner: &Rc<AppInner>) -> Result<Vec<Closure<dyn FnMut(Event)>>> {
    let mut closures = Vec::new();
    let area = inner.dropzone.area.clone();

    // Drag enter/over: must cancel the default to become a drop target
    for name in ["dragenter", "dragover"] {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            if let Some(inner) = weak.upgrade() {
                inner.dropzone.set_drag_active(true);
            }
        }) as Box<dyn FnMut(Event)>);
        area.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .map_err(dom_err("listen drag"))?;
        closures.push(closure);
    }

    // Drag leave
    {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(inner) = weak.upgrade() {
                inner.dropzone.set_drag_active(false);
            }
        }) as Box<dyn FnMut(Event)>);
        area.add_event_listener_with_callback("dragleave", closure.as_ref().unchecked_ref())
            .map_err(dom_err("listen dragleave"))?;
        closures.push(closure);
    }

    // Drop
    {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.dropzone.set_drag_active(false);
            let file = event
                .dyn_ref::<DragEvent>()
                .and_then(DragEvent::data_transfer)
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                read_file(Rc::downgrade(&inner), file);
            }
        }) as Box<dyn FnMut(Event)>);
        area.add_event_listener_with_callback("drop", closure.as_ref().unchecked_ref())
            .map_err(dom_err("listen drop"))?;
        closures.push(closure);
    }

    // Click anywhere on the surface opens the picker
    {
        let input = inner.dropzone.input.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            // The synthetic click on the input bubbles back up here.
            let from_input = event
                .target()
                .is_some_and(|t| t.dyn_ref::<HtmlInputElement>().is_some());
            if !from_input {
                input.click();
            }
        }) as Box<dyn FnMut(Event)>);
        area.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_err("listen click"))?;
        closures.push(closure);
    }

    // Picker selection
    {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                read_file(weak.clone(), file);
            }
            // Picking the same file again should fire `change` again
            input.set_value("");
        }) as Box<dyn FnMut(Event)>);
        inner
            .dropzone
            .input
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .map_err(dom_err("listen change"))?;
        closures.push(closure);
    }

    Ok(closures)
}

/// Read `file` as text and load it once the read completes.
fn read_file(weak: Weak<AppInner>, file: File) {
    log::debug!("reading {} ({} bytes)", file.name(), file.size());
    wasm_bindgen_futures::spawn_local(async move {
        let text = match JsFuture::from(file.text()).await {
            Ok(value) => value.as_string().unwrap_or_else(|| {
                log::warn!("{} did not read as text, loading it as empty", file.name());
                String::new()
            }),
            Err(e) => {
                log::error!("failed to read {}: {e:?}", file.name());
                return;
            }
        };
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if let Err(e) = inner.load_text(&text) {
            log::error!("failed to load {}: {e}", file.name());
        }
    });
}
