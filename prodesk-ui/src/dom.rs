//! Browser Helpers
//!
//! File downloads and clipboard writes through the DOM.

use prodesk::dashboard::{Clipboard, ClipboardError};
use wasm_bindgen::{JsCast, JsValue};

/// Offer `contents` to the user as a file download
pub fn download_text(filename: &str, contents: &str, mime: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(
        &js_sys::Array::of1(&JsValue::from_str(contents)),
        &options,
    )?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(filename);
    a.click();
    web_sys::Url::revoke_object_url(&url)
}

/// `navigator.clipboard`; the write completes asynchronously
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let unavailable = || ClipboardError::Unavailable("navigator.clipboard".to_string());

        let navigator = web_sys::window().ok_or_else(unavailable)?.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .ok()
            .filter(|value| !value.is_undefined())
            .ok_or_else(unavailable)?;

        let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(unavailable)?;

        write
            .call1(&clipboard, &JsValue::from_str(text))
            .map(|_| ())
            .map_err(|e| ClipboardError::Unavailable(format!("{:?}", e)))
    }
}

/// Blocking `window.alert`, used for failures the visitor must acknowledge
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
