//! Shared sound-effect and music managers.
//!
//! Each manager owns a registry of media elements and keeps every element's
//! effective volume equal to `original × master`, or 0 while muted or
//! disabled. The enabled flag is not stored here: it is read from, and
//! written to, the [`PreferenceStore`], and changes arrive through a
//! subscription no matter who made them.
use crate::channel::Channel;
use crate::constants::PREFERENCE_DEFAULT;
use crate::platform::Playable;
use crate::prefs::{PreferenceStore, SubscriptionId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Sound,
    Music,
}

impl MediaKind {
    pub fn channel(self) -> Channel {
        match self {
            MediaKind::Sound => Channel::Sound,
            MediaKind::Music => Channel::Music,
        }
    }

    pub fn from_channel(channel: Channel) -> Option<Self> {
        match channel {
            Channel::Sound => Some(MediaKind::Sound),
            Channel::Music => Some(MediaKind::Music),
            Channel::Haptics => None,
        }
    }
}

struct Registered<E> {
    element: E,
    original_volume: f32,
    // Set only for music paused by a disable, so enabling resumes exactly these
    paused_by_disable: bool,
}

struct ManagerState<E> {
    master_volume: f32,
    muted_explicitly: bool,
    elements: Vec<Registered<E>>,
    cue: Option<Registered<E>>,
}

pub struct MediaManager<E: Playable + 'static> {
    kind: MediaKind,
    prefs: Rc<PreferenceStore>,
    state: RefCell<ManagerState<E>>,
    subscription: Cell<Option<SubscriptionId>>,
}

fn effective(original: f32, master: f32, audible: bool) -> f32 {
    if audible {
        (original * master).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl<E: Playable + 'static> MediaManager<E> {
    pub fn new(kind: MediaKind, prefs: Rc<PreferenceStore>, master_volume: f32) -> Rc<Self> {
        let manager = Rc::new(Self {
            kind,
            prefs: prefs.clone(),
            state: RefCell::new(ManagerState {
                master_volume: master_volume.clamp(0.0, 1.0),
                muted_explicitly: false,
                elements: Vec::new(),
                cue: None,
            }),
            subscription: Cell::new(None),
        });
        let weak = Rc::downgrade(&manager);
        let id = prefs.subscribe(move |pref| {
            if let Some(m) = weak.upgrade() {
                if pref.key == m.kind.channel() {
                    m.on_enabled_changed(pref.value);
                }
            }
        });
        manager.subscription.set(Some(id));
        manager
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Live read of the persisted preference.
    pub fn is_enabled(&self) -> bool {
        self.prefs.load(self.kind.channel(), PREFERENCE_DEFAULT)
    }

    /// Writes through the preference store; the store's notification does
    /// the actual volume and playback work.
    pub fn set_enabled(&self, enabled: bool) {
        self.prefs.save(self.kind.channel(), enabled);
    }

    pub fn is_muted(&self) -> bool {
        self.state.borrow().muted_explicitly
    }

    pub fn is_audible(&self) -> bool {
        !self.is_muted() && self.is_enabled()
    }

    pub fn master_volume(&self) -> f32 {
        self.state.borrow().master_volume
    }

    pub fn len(&self) -> usize {
        self.state.borrow().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_registered(&self, element: &E) -> bool {
        self.state
            .borrow()
            .elements
            .iter()
            .any(|r| r.element.is_same(element))
    }

    /// Add an element, remembering its current volume as the original.
    /// Registering the same element twice is a no-op.
    pub fn register(&self, element: E) -> bool {
        if self.is_registered(&element) {
            return false;
        }
        let enabled = self.is_enabled();
        let mut st = self.state.borrow_mut();
        let original_volume = element.volume();
        element.set_volume(effective(
            original_volume,
            st.master_volume,
            enabled && !st.muted_explicitly,
        ));
        let mut paused_by_disable = false;
        if self.kind == MediaKind::Music && !enabled && !element.is_paused() {
            element.pause();
            paused_by_disable = true;
        }
        st.elements.push(Registered {
            element,
            original_volume,
            paused_by_disable,
        });
        log::debug!("[media] {:?} registered ({} total)", self.kind, st.elements.len());
        true
    }

    /// Drop an element from the registry. The element itself is left as is.
    pub fn unregister(&self, element: &E) -> bool {
        let mut st = self.state.borrow_mut();
        let before = st.elements.len();
        st.elements.retain(|r| !r.element.is_same(element));
        before != st.elements.len()
    }

    /// Session-only mute; the persisted preference is untouched.
    pub fn mute_all(&self) {
        self.state.borrow_mut().muted_explicitly = true;
        self.apply_volumes(self.is_enabled());
    }

    pub fn unmute_all(&self) {
        self.state.borrow_mut().muted_explicitly = false;
        self.apply_volumes(self.is_enabled());
    }

    pub fn set_master_volume(&self, volume: f32) {
        if !volume.is_finite() {
            log::warn!("[media] ignoring non-finite master volume");
            return;
        }
        self.state.borrow_mut().master_volume = volume.clamp(0.0, 1.0);
        self.apply_volumes(self.is_enabled());
    }

    /// Volume this manager wants `element` to have, if registered.
    pub fn effective_volume_of(&self, element: &E) -> Option<f32> {
        let enabled = self.is_enabled();
        let st = self.state.borrow();
        st.elements
            .iter()
            .find(|r| r.element.is_same(element))
            .map(|r| effective(r.original_volume, st.master_volume, enabled && !st.muted_explicitly))
    }

    /// The page started `element` itself. Any pause from an earlier disable
    /// is forgotten, so a later enable leaves the element as the page left it.
    pub fn note_playback(&self, element: &E) {
        let mut st = self.state.borrow_mut();
        if let Some(r) = st.elements.iter_mut().find(|r| r.element.is_same(element)) {
            r.paused_by_disable = false;
        }
    }

    /// Element used for the click cue that accompanies every feedback request.
    pub fn set_cue(&self, element: E) {
        let original_volume = element.volume();
        self.state.borrow_mut().cue = Some(Registered {
            element,
            original_volume,
            paused_by_disable: false,
        });
    }

    /// Rewind and play the cue if this channel is audible. Returns whether
    /// playback was started.
    pub fn play_cue(&self) -> bool {
        if !self.is_audible() {
            return false;
        }
        let st = self.state.borrow();
        let Some(cue) = &st.cue else {
            return false;
        };
        cue.element
            .set_volume(effective(cue.original_volume, st.master_volume, true));
        cue.element.rewind();
        match cue.element.play() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("[media] cue playback failed: {}", e);
                false
            }
        }
    }

    fn apply_volumes(&self, enabled: bool) {
        let st = self.state.borrow();
        let audible = enabled && !st.muted_explicitly;
        for r in &st.elements {
            r.element
                .set_volume(effective(r.original_volume, st.master_volume, audible));
        }
    }

    fn on_enabled_changed(&self, enabled: bool) {
        self.apply_volumes(enabled);
        if self.kind != MediaKind::Music {
            return;
        }
        let mut st = self.state.borrow_mut();
        if enabled {
            for r in st.elements.iter_mut().filter(|r| r.paused_by_disable) {
                r.paused_by_disable = false;
                if let Err(e) = r.element.play() {
                    log::debug!("[media] resume rejected: {}", e);
                }
            }
        } else {
            for r in st.elements.iter_mut() {
                if !r.element.is_paused() {
                    r.element.pause();
                    r.paused_by_disable = true;
                }
            }
        }
    }
}

impl<E: Playable + 'static> Drop for MediaManager<E> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.prefs.unsubscribe(id);
        }
    }
}
