//! Browser download of an [`ExportFile`].
//!
//! A `Blob` is wrapped in an object URL and a hidden `<a download>` is
//! appended to the body and clicked. [`TransientLink`] owns both; dropping it
//! removes the anchor and revokes the URL, whichever way `download` exits.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlElement, Url};

use super::ExportFile;
use crate::error::{dom_err, CsvGridError, Result};

/// Trigger a save of `file` through the browser.
pub(crate) fn download(file: &ExportFile) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| CsvGridError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| CsvGridError::Dom("no document".into()))?;
    let body = document
        .body()
        .ok_or_else(|| CsvGridError::Dom("no body element".into()))?;

    let blob = create_blob(file)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(dom_err("create object URL"))?;

    let anchor = document
        .create_element("a")
        .map_err(dom_err("create anchor"))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| CsvGridError::Dom("anchor is not an HtmlAnchorElement".into()))?;

    // From here on the guard owns the URL and the element.
    let mut link = TransientLink {
        anchor,
        body,
        url,
        attached: false,
    };
    link.anchor.set_href(&link.url);
    link.anchor.set_download(&file.file_name);
    link.anchor
        .style()
        .set_property("visibility", "hidden")
        .map_err(dom_err("hide anchor"))?;

    link.body
        .append_child(&link.anchor)
        .map_err(dom_err("append anchor"))?;
    link.attached = true;
    link.anchor.click();

    log::info!("download triggered: {}", file.file_name);
    Ok(())
}

fn create_blob(file: &ExportFile) -> Result<Blob> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&file.text()));

    let properties = BlobPropertyBag::new();
    properties.set_type(&file.content_type);

    Blob::new_with_str_sequence_and_options(&parts, &properties).map_err(dom_err("create blob"))
}

/// Anchor + object URL that live for exactly one download.
struct TransientLink {
    anchor: HtmlAnchorElement,
    body: HtmlElement,
    url: String,
    attached: bool,
}

impl Drop for TransientLink {
    fn drop(&mut self) {
        if self.attached {
            let _ = self.body.remove_child(&self.anchor);
        }
        let _ = Url::revoke_object_url(&self.url);
    }
}
