//! DOM rendering of the grid.
//!
//! ```text
//! <table>
//!   <thead><tr><th>name</th>...<th>Actions</th></tr></thead>
//!   <tbody><tr><td><input data-row data-col></td>...<td><button data-action="delete-row"></td></tr></tbody>
//! </table>
//! <div><button data-action="add-row"> <button data-action="download"></div>
//! ```
//!
//! Handlers live on the container (see `app`), so this module only builds
//! elements and tags them with data attributes.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use super::{GridAction, ACTION_ATTR, COL_ATTR, ROW_ATTR};
use crate::document::Document;
use crate::error::{dom_err, CsvGridError, Result};

const ACTIONS_LABEL: &str = "Actions";
const ADD_ROW_LABEL: &str = "+ Add Row";
const DOWNLOAD_LABEL: &str = "Download CSV";
const DELETE_LABEL: &str = "Delete";

/// Replace the contents of `grid` with a table for `doc`.
///
/// With no document the container is emptied and hidden.
pub(crate) fn render(
    page: &web_sys::Document,
    grid: &HtmlElement,
    doc: Option<&Document>,
) -> Result<()> {
    grid.set_text_content(None);

    let Some(doc) = doc else {
        let _ = grid.style().set_property("display", "none");
        return Ok(());
    };
    let _ = grid.style().set_property("display", "block");

    let table = element(page, "table")?;
    table.set_class_name("csvgrid-table");
    append(&table, &header_row(page, doc)?)?;

    let tbody = element(page, "tbody")?;
    for (row_idx, row) in doc.rows().iter().enumerate() {
        append(&tbody, &data_row(page, row_idx, row)?)?;
    }
    append(&table, &tbody)?;
    append(grid, &table)?;

    let actions = element(page, "div")?;
    actions.set_class_name("csvgrid-actions");
    append(&actions, &button(page, ADD_ROW_LABEL, GridAction::ADD_ROW, None)?)?;
    append(
        &actions,
        &button(page, DOWNLOAD_LABEL, GridAction::DOWNLOAD, None)?,
    )?;
    append(grid, &actions)?;

    log::trace!("rendered {} row(s)", doc.row_count());
    Ok(())
}

fn header_row(page: &web_sys::Document, doc: &Document) -> Result<Element> {
    let thead = element(page, "thead")?;
    let tr = element(page, "tr")?;
    for label in doc.header() {
        let th = element(page, "th")?;
        th.set_text_content(Some(label));
        append(&tr, &th)?;
    }
    let th = element(page, "th")?;
    th.set_text_content(Some(ACTIONS_LABEL));
    append(&tr, &th)?;
    append(&thead, &tr)?;
    Ok(thead)
}

fn data_row(page: &web_sys::Document, row_idx: usize, row: &[String]) -> Result<Element> {
    let tr = element(page, "tr")?;
    let row_attr = row_idx.to_string();
    for (col_idx, value) in row.iter().enumerate() {
        let td = element(page, "td")?;
        let input = element(page, "input")?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| CsvGridError::Dom("<input> has unexpected type".into()))?;
        input.set_type("text");
        input.set_value(value);
        set_attr(&input, ROW_ATTR, &row_attr)?;
        set_attr(&input, COL_ATTR, &col_idx.to_string())?;
        append(&td, &input)?;
        append(&tr, &td)?;
    }
    let td = element(page, "td")?;
    append(
        &td,
        &button(page, DELETE_LABEL, GridAction::DELETE_ROW, Some(&row_attr))?,
    )?;
    append(&tr, &td)?;
    Ok(tr)
}

fn button(
    page: &web_sys::Document,
    label: &str,
    action: &str,
    row: Option<&str>,
) -> Result<Element> {
    let button = element(page, "button")?;
    set_attr(&button, "type", "button")?;
    set_attr(&button, ACTION_ATTR, action)?;
    if let Some(row) = row {
        set_attr(&button, ROW_ATTR, row)?;
    }
    button.set_text_content(Some(label));
    Ok(button)
}

fn element(page: &web_sys::Document, tag: &str) -> Result<Element> {
    page.create_element(tag).map_err(dom_err("create element"))
}

fn append(parent: &Element, child: &Element) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(dom_err("append child"))
}

fn set_attr(el: &Element, name: &str, value: &str) -> Result<()> {
    el.set_attribute(name, value).map_err(dom_err("set attribute"))
}
