#![cfg(target_arch = "wasm32")]
//! Browser front-end for the feedback core: JS exports, capability
//! detection and DOM wiring.
use feedback_core::{
    Capabilities, Channel, Feedback, FeedbackConfig, HapticProxy, MediaKind, Pattern, ToneSynth,
    Vibrator,
};
use std::cell::OnceCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod detect;
mod dom;
mod events;
mod media;
mod overlay;
mod platform;
mod timers;

use media::MediaElement;

pub(crate) type WebFeedback = Feedback<MediaElement>;

thread_local! {
    // The one root the JS exports reach the services through
    static FEEDBACK: OnceCell<Rc<WebFeedback>> = OnceCell::new();
}

fn build_services(window: &web::Window, document: &web::Document) -> Rc<WebFeedback> {
    let mut config = FeedbackConfig::default();
    // `<body>` may not be parsed yet when an export runs from `<head>`
    let namespace = detect::pick_namespace(
        document
            .body()
            .and_then(|b| b.get_attribute(constants::NAMESPACE_ATTR)),
        document
            .document_element()
            .and_then(|html| html.get_attribute(constants::NAMESPACE_ATTR)),
    );
    if let Some(ns) = namespace {
        config = config.with_namespace(ns);
    }

    let proxy = platform::SwitchProxy::detect(window, document)
        .map(|p| Rc::new(p) as Rc<dyn HapticProxy>);
    let vibrator = platform::NavigatorVibrator::detect(window)
        .map(|v| Rc::new(v) as Rc<dyn Vibrator>);
    let tones = audio::WebToneSynth::detect(window).map(|t| Rc::new(t) as Rc<dyn ToneSynth>);
    let caps = Capabilities {
        store: Rc::new(platform::LocalStore::open(window)),
        clock: Rc::new(timers::WebClock::new()),
        proxy,
        vibrator,
        tones,
    };
    Rc::new(Feedback::new(config, caps))
}

fn init() -> anyhow::Result<Rc<WebFeedback>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let feedback = build_services(&window, &document);

    events::gestures::wire_gesture_tracking(&window, &feedback);
    events::keyboard::wire_debug_shortcut(&document, &feedback);
    Ok(feedback)
}

/// Services are built lazily, on DOM ready or on the first exported call.
/// Nothing built here depends on the DOM being parsed; toggle controls are
/// wired separately once it is.
fn services() -> Option<Rc<WebFeedback>> {
    if let Some(fb) = FEEDBACK.with(|cell| cell.get().cloned()) {
        return Some(fb);
    }
    match init() {
        Ok(fb) => {
            FEEDBACK.with(|cell| {
                _ = cell.set(fb.clone());
            });
            Some(fb)
        }
        Err(e) => {
            log::error!("init error: {:?}", e);
            None
        }
    }
}

fn parse_channel(channel: &str) -> Option<Channel> {
    match channel.parse::<Channel>() {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

fn media_kind(channel: &str) -> Option<MediaKind> {
    let c = parse_channel(channel)?;
    let kind = MediaKind::from_channel(c);
    if kind.is_none() {
        log::warn!("{} has no media manager", c);
    }
    kind
}

fn refresh_overlay(feedback: &WebFeedback) {
    if let Some(document) = dom::window_document() {
        overlay::update(&document, &feedback.diagnostics());
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("feedback-web starting");

    if let Some(document) = dom::window_document() {
        let doc = document.clone();
        dom::on_dom_ready(&document, move || {
            if let Some(fb) = services() {
                events::controls::wire_toggle_controls(&doc, &fb);
            }
        });
    }
    Ok(())
}

/// Fire-and-forget feedback. Unknown pattern names are logged and ignored.
#[wasm_bindgen(js_name = triggerFeedback)]
pub fn trigger_feedback(pattern: &str) {
    let pattern = match pattern.parse::<Pattern>() {
        Ok(p) => p,
        Err(e) => {
            log::warn!("{}", e);
            return;
        }
    };
    let Some(fb) = services() else {
        return;
    };
    spawn_local(async move {
        let report = fb.trigger(pattern).await;
        log::debug!(
            "[feedback] {} -> {:?} (cue {})",
            pattern,
            report.outcome,
            report.cue_played
        );
        refresh_overlay(&fb);
    });
}

#[wasm_bindgen(js_name = enableChannel)]
pub fn enable_channel(channel: &str) {
    if let (Some(c), Some(fb)) = (parse_channel(channel), services()) {
        fb.enable(c);
    }
}

#[wasm_bindgen(js_name = disableChannel)]
pub fn disable_channel(channel: &str) {
    if let (Some(c), Some(fb)) = (parse_channel(channel), services()) {
        fb.disable(c);
    }
}

/// Returns the channel's new state.
#[wasm_bindgen(js_name = toggleChannel)]
pub fn toggle_channel(channel: &str) -> bool {
    match (parse_channel(channel), services()) {
        (Some(c), Some(fb)) => fb.toggle(c),
        _ => false,
    }
}

#[wasm_bindgen(js_name = isChannelEnabled)]
pub fn is_channel_enabled(channel: &str) -> bool {
    match (parse_channel(channel), services()) {
        (Some(c), Some(fb)) => fb.is_enabled(c),
        _ => false,
    }
}

#[wasm_bindgen(js_name = registerPlayable)]
pub fn register_playable(element: web::HtmlMediaElement, channel: &str) -> bool {
    let (Some(c), Some(fb)) = (parse_channel(channel), services()) else {
        return false;
    };
    if !fb.register_playable(MediaElement(element.clone()), c) {
        return false;
    }
    if c == Channel::Music {
        // A track the page starts itself is no longer ours to resume
        let el = element.clone();
        media::watch_playback(&element, move || {
            if let Some(fb) = services() {
                fb.manager(MediaKind::Music)
                    .note_playback(&MediaElement(el.clone()));
            }
        });
    }
    true
}

#[wasm_bindgen(js_name = unregisterPlayable)]
pub fn unregister_playable(element: web::HtmlMediaElement, channel: &str) -> bool {
    match (parse_channel(channel), services()) {
        (Some(c), Some(fb)) => fb.unregister_playable(&MediaElement(element), c),
        _ => false,
    }
}

/// Element played as the click accompanying every feedback request.
#[wasm_bindgen(js_name = setClickCue)]
pub fn set_click_cue(element: web::HtmlMediaElement) {
    if let Some(fb) = services() {
        fb.set_click_cue(MediaElement(element));
    }
}

#[wasm_bindgen(js_name = muteAll)]
pub fn mute_all(channel: &str) {
    if let (Some(k), Some(fb)) = (media_kind(channel), services()) {
        fb.manager(k).mute_all();
    }
}

#[wasm_bindgen(js_name = unmuteAll)]
pub fn unmute_all(channel: &str) {
    if let (Some(k), Some(fb)) = (media_kind(channel), services()) {
        fb.manager(k).unmute_all();
    }
}

#[wasm_bindgen(js_name = setMasterVolume)]
pub fn set_master_volume(channel: &str, volume: f32) {
    if let (Some(k), Some(fb)) = (media_kind(channel), services()) {
        fb.manager(k).set_master_volume(volume);
    }
}

#[wasm_bindgen(js_name = showFeedbackDebug)]
pub fn show_debug() {
    if let (Some(document), Some(fb)) = (dom::window_document(), services()) {
        overlay::show(&document);
        overlay::update(&document, &fb.diagnostics());
    }
}

#[wasm_bindgen(js_name = hideFeedbackDebug)]
pub fn hide_debug() {
    if let Some(document) = dom::window_document() {
        overlay::hide(&document);
    }
}
