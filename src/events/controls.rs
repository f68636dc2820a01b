use crate::dom;
use crate::overlay;
use crate::WebFeedback;
use feedback_core::Channel;
use std::rc::Rc;
use web_sys as web;

/// Keep every `data-feedback-toggle` control in step with its preference,
/// whichever side changes it.
pub fn wire_toggle_controls(document: &web::Document, feedback: &Rc<WebFeedback>) {
    for channel in Channel::ALL {
        let enabled = feedback.is_enabled(channel);
        for el in dom::toggle_controls(document, channel) {
            dom::sync_toggle(&el, enabled);
            let fb = feedback.clone();
            dom::add_click_listener(&el, move || {
                let now = fb.toggle(channel);
                log::info!("[controls] {} {}", channel, if now { "enabled" } else { "disabled" });
            });
        }
    }

    let doc = document.clone();
    let weak = Rc::downgrade(feedback);
    feedback.preferences().subscribe(move |pref| {
        // Query on each change so controls added later are covered too
        for el in dom::toggle_controls(&doc, pref.key) {
            dom::sync_toggle(&el, pref.value);
        }
        if let Some(fb) = weak.upgrade() {
            overlay::update(&doc, &fb.diagnostics());
        }
    });
}
