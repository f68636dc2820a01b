use crate::WebFeedback;
use feedback_core::InteractionKind;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Feed every tracked interaction into the gesture credit tracker.
///
/// Listeners sit on `window` in the capture phase, so credits accumulate
/// even when a page handler stops propagation.
pub fn wire_gesture_tracking(window: &web::Window, feedback: &Rc<WebFeedback>) {
    let opts = web::AddEventListenerOptions::new();
    opts.set_capture(true);
    opts.set_passive(true);
    for kind in InteractionKind::ALL {
        let fb = feedback.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            fb.record_interaction(kind);
        }) as Box<dyn FnMut(_)>);
        if let Err(e) = window.add_event_listener_with_callback_and_add_event_listener_options(
            kind.event_type(),
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[gestures] cannot listen for {}: {:?}", kind, e);
        }
        closure.forget();
    }
}
