use crate::input;
use crate::overlay;
use cloud_core::{PatternKind, SampleMailbox, UiEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type UiQueue = Rc<RefCell<Vec<UiEvent>>>;

#[inline]
pub fn pattern_for_key(key: &str) -> Option<PatternKind> {
    match key {
        "1" => Some(PatternKind::Sphere),
        "2" => Some(PatternKind::Spiral),
        "3" => Some(PatternKind::Heart),
        _ => None,
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    ui_queue: &UiQueue,
    canvas: &web::HtmlCanvasElement,
) {
    let key = ev.key();
    if let Some(kind) = pattern_for_key(&key) {
        ui_queue.borrow_mut().push(UiEvent::SelectPattern(kind));
        return;
    }
    match key.as_str() {
        "Enter" => {
            if let Some(doc) = crate::dom::window_document() {
                if doc.fullscreen_element().is_some() {
                    doc.exit_fullscreen();
                } else {
                    let _ = canvas.request_fullscreen();
                }
            }
            ev.prevent_default();
        }
        "Escape" => {
            if let Some(doc) = crate::dom::window_document() {
                doc.exit_fullscreen();
            }
        }
        "h" | "H" => {
            if let Some(doc) = crate::dom::window_document() {
                overlay::toggle(&doc);
            }
        }
        _ => {}
    }
}

pub fn wire_global_keydown(ui_queue: UiQueue, canvas: web::HtmlCanvasElement) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &ui_queue, &canvas);
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Pattern buttons, if the page provides them.
pub fn wire_pattern_buttons(document: &web::Document, ui_queue: &UiQueue) {
    for kind in PatternKind::ALL {
        let queue = ui_queue.clone();
        let id = format!("pattern-{}", kind);
        crate::dom::add_click_listener(document, &id, move || {
            queue.borrow_mut().push(UiEvent::SelectPattern(kind));
        });
    }
}

/// Pointer moves feed the mouse fallback; leaving the canvas reads as no input.
pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, mailbox: Rc<RefCell<SampleMailbox>>) {
    {
        let canvas_move = canvas.clone();
        let mailbox = mailbox.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let sample = input::pointer_sample(&ev, &canvas_move);
            mailbox.borrow_mut().post_pointer(sample);
        }) as Box<dyn FnMut(web::PointerEvent)>);
        let _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            mailbox.borrow_mut().clear_pointer();
        }) as Box<dyn FnMut(web::PointerEvent)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
