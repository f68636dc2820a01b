use crate::constants::{TOGGLE_ATTR, TOGGLE_OFF_CLASS};
use feedback_core::Channel;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Run `f` once the DOM is parsed (immediately if it already is).
pub fn on_dom_ready(document: &web::Document, f: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let closure = Closure::once_into_js(f);
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        closure.unchecked_ref(),
        &opts,
    );
}

#[inline]
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Every element marked `data-feedback-toggle="<channel>"`.
pub fn toggle_controls(document: &web::Document, channel: Channel) -> Vec<web::Element> {
    let selector = format!("[{}=\"{}\"]", TOGGLE_ATTR, channel.name());
    let Ok(list) = document.query_selector_all(&selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Reflect `enabled` on a toggle control without firing its listeners.
pub fn sync_toggle(el: &web::Element, enabled: bool) {
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.set_checked(enabled);
    }
    _ = el.set_attribute("aria-pressed", if enabled { "true" } else { "false" });
    let cl = el.class_list();
    if enabled {
        _ = cl.remove_1(TOGGLE_OFF_CLASS);
    } else {
        _ = cl.add_1(TOGGLE_OFF_CLASS);
    }
}
