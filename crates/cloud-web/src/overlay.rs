//! Camera guidance panel shown when hand tracking is unavailable.

use web_sys as web;

const OVERLAY_ID: &str = "camera-overlay";
const MESSAGE_ID: &str = "camera-overlay-message";

#[inline]
pub fn show(document: &web::Document, message: &str) {
    crate::dom::set_text(document, MESSAGE_ID, message);
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(OVERLAY_ID)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

/// Toggle without changing the current message.
#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
            let _ = el.set_attribute("style", "");
        }
    } else {
        hide(document);
    }
}
