use crate::constants::{DEBUG_OVERLAY_ID, DEBUG_OVERLAY_STYLE};
use feedback_core::{DeliveryOutcome, Diagnostics};
use wasm_bindgen::JsCast;
use web_sys as web;

fn overlay(document: &web::Document) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(DEBUG_OVERLAY_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

fn ensure_overlay(document: &web::Document) -> Option<web::HtmlElement> {
    if let Some(el) = overlay(document) {
        return Some(el);
    }
    let el = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    el.set_id(DEBUG_OVERLAY_ID);
    _ = el.set_attribute("style", DEBUG_OVERLAY_STYLE);
    document.body()?.append_child(&el).ok()?;
    Some(el)
}

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = ensure_overlay(document) {
        _ = el.style().set_property("display", "block");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = overlay(document) {
        _ = el.style().set_property("display", "none");
    }
}

#[inline]
pub fn is_visible(document: &web::Document) -> bool {
    overlay(document)
        .map(|el| {
            el.style()
                .get_property_value("display")
                .map(|d| d != "none")
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_visible(document) {
        hide(document);
    } else {
        show(document);
    }
}

fn on_off(v: bool) -> &'static str {
    if v {
        "on"
    } else {
        "off"
    }
}

fn outcome_text(outcome: Option<DeliveryOutcome>) -> String {
    match outcome {
        None => "-".to_string(),
        Some(DeliveryOutcome::Delivered(m)) => format!("delivered via {}", m),
        Some(other) => format!("{:?}", other).to_lowercase(),
    }
}

/// Refresh the overlay text if it is showing.
pub fn update(document: &web::Document, d: &Diagnostics) {
    if !is_visible(document) {
        return;
    }
    if let Some(el) = overlay(document) {
        let text = format!(
            "haptics {} | sound {} ({}) | music {} ({})\ncredits {} | recent {} | handles {}/{}\nlast: {}",
            on_off(d.haptics_enabled),
            on_off(d.sound_enabled),
            d.sound_elements,
            on_off(d.music_enabled),
            d.music_elements,
            d.credits,
            d.recent_gesture,
            d.free_handles,
            d.pool_capacity,
            outcome_text(d.last_outcome),
        );
        el.set_text_content(Some(&text));
    }
}
