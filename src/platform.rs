// Browser implementations of the storage, vibration and gesture-proxy
// capabilities. Each `detect` returns `None` when the capability is absent.

use crate::constants::{HAPTIC_POOL_ID, HAPTIC_POOL_STYLE};
use crate::detect;
use feedback_core::{HapticProxy, KeyValueStore, PlatformError, ProxyHandle, Vibrator};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

// ---------------- localStorage ----------------

pub struct LocalStore {
    storage: Option<web::Storage>,
}

impl LocalStore {
    /// Accessing `localStorage` throws in some privacy modes; that is kept as
    /// an unavailable store rather than an error.
    pub fn open(window: &web::Window) -> Self {
        let storage = match window.local_storage() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[storage] localStorage unavailable: {}", js_error(e));
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&web::Storage, PlatformError> {
        self.storage
            .as_ref()
            .ok_or_else(|| PlatformError::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| PlatformError::Storage(js_error(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| PlatformError::Storage(js_error(e)))
    }
}

// ---------------- navigator.vibrate ----------------

pub struct NavigatorVibrator {
    navigator: web::Navigator,
}

impl NavigatorVibrator {
    pub fn detect(window: &web::Window) -> Option<Self> {
        let navigator = window.navigator();
        has_property(&navigator, "vibrate").then_some(Self { navigator })
    }
}

impl Vibrator for NavigatorVibrator {
    fn vibrate(&self, sequence: &[u32]) -> Result<(), PlatformError> {
        let pattern: js_sys::Array = sequence.iter().map(|ms| JsValue::from(*ms)).collect();
        if self.navigator.vibrate_with_pattern(&pattern) {
            Ok(())
        } else {
            // Chrome refuses without sticky user activation
            Err(PlatformError::Denied("navigator.vibrate returned false".into()))
        }
    }
}

// ---------------- iOS switch control proxy ----------------

/// Toggling an `<input type="checkbox" switch>` through its label produces
/// a system haptic on iOS Safari 17.4+, but only inside a user gesture.
///
/// Handles are built detached and mounted into a hidden container on first
/// use, so detection works before `<body>` exists.
pub struct SwitchProxy {
    document: web::Document,
}

impl SwitchProxy {
    pub fn detect(window: &web::Window, document: &web::Document) -> Option<Self> {
        let ua = window.navigator().user_agent().ok()?;
        if !detect::supports_switch_haptics(&ua) {
            return None;
        }
        let probe = document.create_element("input").ok()?;
        if !has_property(&probe, "switch") {
            log::debug!("[haptics] switch inputs not supported by this engine");
            return None;
        }
        Some(Self {
            document: document.clone(),
        })
    }

    fn build(&self, id: usize) -> Result<SwitchHandle, JsValue> {
        let input = self
            .document
            .create_element("input")?
            .dyn_into::<web::HtmlInputElement>()?;
        input.set_type("checkbox");
        input.set_attribute("switch", "")?;
        input.set_tab_index(-1);
        input.set_id(&format!("{}-{}", HAPTIC_POOL_ID, id));

        let label = self
            .document
            .create_element("label")?
            .dyn_into::<web::HtmlLabelElement>()?;
        label.append_child(&input)?;
        Ok(SwitchHandle {
            document: self.document.clone(),
            label,
            input,
        })
    }
}

/// The hidden container holding every switch, created on demand.
fn pool_container(document: &web::Document) -> Result<web::Element, PlatformError> {
    if let Some(el) = document.get_element_by_id(HAPTIC_POOL_ID) {
        return Ok(el);
    }
    let body = document
        .body()
        .ok_or_else(|| PlatformError::Script("document has no body yet".into()))?;
    let el = document
        .create_element("div")
        .map_err(|e| PlatformError::Script(js_error(e)))?;
    el.set_id(HAPTIC_POOL_ID);
    _ = el.set_attribute("style", HAPTIC_POOL_STYLE);
    _ = el.set_attribute("aria-hidden", "true");
    body.append_child(&el)
        .map_err(|e| PlatformError::Script(js_error(e)))?;
    Ok(el)
}

impl HapticProxy for SwitchProxy {
    fn create_handle(&self, id: usize) -> Result<Box<dyn ProxyHandle>, PlatformError> {
        self.build(id)
            .map(|h| Box::new(h) as Box<dyn ProxyHandle>)
            .map_err(|e| PlatformError::Script(js_error(e)))
    }
}

pub struct SwitchHandle {
    document: web::Document,
    label: web::HtmlLabelElement,
    input: web::HtmlInputElement,
}

impl ProxyHandle for SwitchHandle {
    fn fire(&self) -> Result<(), PlatformError> {
        if !self.label.is_connected() {
            pool_container(&self.document)?
                .append_child(&self.label)
                .map_err(|e| PlatformError::Script(js_error(e)))?;
        }
        self.label.click();
        Ok(())
    }

    fn is_toggled(&self) -> bool {
        self.input.checked()
    }

    fn reset(&self) {
        self.input.set_checked(false);
    }
}
