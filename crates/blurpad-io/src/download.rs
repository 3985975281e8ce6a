//! Saving the exported PNG.
//!
//! The rasterized bytes are wrapped in a `Blob`, exposed through an
//! object URL, and handed to a detached `<a download>` that is clicked
//! once. Browser only.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// A browser call failed while offering the export.
#[derive(Debug, thiserror::Error)]
#[error("download failed: {0}")]
pub struct DownloadError(String);

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self(format!("{value:?}"))
    }
}

/// Offer encoded image `bytes` (the export PNG) as `filename`.
///
/// # Errors
///
/// Returns [`DownloadError`] if the page has no document body or a
/// `Blob`/URL/DOM call is refused.
pub fn trigger_download(bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), DownloadError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| DownloadError("no document".into()))?;
    let body = document
        .body()
        .ok_or_else(|| DownloadError("no document body".into()))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(filename);
    body.append_child(&anchor)?;
    anchor.click();

    // Already handed to the browser; cleanup errors don't undo that.
    let _ = body.remove_child(&anchor);
    let _ = Url::revoke_object_url(&url);

    log::info!("export offered as {filename} ({} bytes)", bytes.len());
    Ok(())
}
