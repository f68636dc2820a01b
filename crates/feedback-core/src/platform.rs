//! Capability traits for everything the feedback core needs from its host.
//!
//! A missing capability is represented by `None` in [`Capabilities`], never by
//! a call that fails later. Implementations for the browser live in the web
//! crate; tests use in-memory fakes.
use crate::clock::Clock;
use crate::error::Result;
use std::rc::Rc;
use std::time::Duration;

/// Synchronous string key-value storage (e.g. `localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One reusable trigger of the DOM gesture proxy.
pub trait ProxyHandle {
    /// Perform one haptic trigger. `Ok` only means nothing threw.
    fn fire(&self) -> Result<()>;
    /// Whether the underlying element was left in a toggled state.
    fn is_toggled(&self) -> bool;
    fn reset(&self);
}

/// Primary mechanism: a gesture-gated DOM proxy that produces a haptic tick.
pub trait HapticProxy {
    fn create_handle(&self, id: usize) -> Result<Box<dyn ProxyHandle>>;
}

/// Secondary mechanism: programmatic vibration.
pub trait Vibrator {
    /// `sequence` alternates on/off durations in milliseconds.
    fn vibrate(&self, sequence: &[u32]) -> Result<()>;
}

/// Tertiary mechanism: a short synthesized tone sequence.
pub trait ToneSynth {
    fn play(&self, frequencies: &[f32], each: Duration) -> Result<()>;
}

/// A media element whose volume and playback the managers control.
pub trait Playable {
    fn volume(&self) -> f32;
    fn set_volume(&self, volume: f32);
    fn is_paused(&self) -> bool;
    /// Start playback. Autoplay rejections that arrive later are the
    /// implementation's to swallow.
    fn play(&self) -> Result<()>;
    fn pause(&self);
    /// Seek back to the start.
    fn rewind(&self);
    /// Identity comparison; two handles to the same element are the same.
    fn is_same(&self, other: &Self) -> bool;
}

/// Everything injected into [`crate::Feedback`].
#[derive(Clone)]
pub struct Capabilities {
    pub store: Rc<dyn KeyValueStore>,
    pub clock: Rc<dyn Clock>,
    pub proxy: Option<Rc<dyn HapticProxy>>,
    pub vibrator: Option<Rc<dyn Vibrator>>,
    pub tones: Option<Rc<dyn ToneSynth>>,
}

impl Capabilities {
    /// Storage and time only; every delivery mechanism absent.
    pub fn minimal(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            proxy: None,
            vibrator: None,
            tones: None,
        }
    }
}
