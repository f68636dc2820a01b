use crate::overlay;
use crate::WebFeedback;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Alt+Shift+D toggles the diagnostic overlay.
#[inline]
pub fn is_debug_shortcut(ev: &web::KeyboardEvent) -> bool {
    ev.alt_key() && ev.shift_key() && !ev.ctrl_key() && ev.code() == "KeyD"
}

pub fn wire_debug_shortcut(document: &web::Document, feedback: &Rc<WebFeedback>) {
    let doc = document.clone();
    let fb = Rc::downgrade(feedback);
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if !is_debug_shortcut(&ev) {
            return;
        }
        overlay::toggle(&doc);
        if let Some(fb) = fb.upgrade() {
            overlay::update(&doc, &fb.diagnostics());
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
