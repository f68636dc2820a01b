//! Facade tying preferences, gesture credits, the delivery cascade and the
//! two media managers together. This is the whole surface collaborators use.
use crate::cascade::{DeliveryCascade, DeliveryOutcome};
use crate::channel::Channel;
use crate::clock::Clock;
use crate::config::FeedbackConfig;
use crate::constants::PREFERENCE_DEFAULT;
use crate::gesture::{GestureCreditTracker, InteractionKind};
use crate::media::{MediaKind, MediaManager};
use crate::pattern::Pattern;
use crate::platform::{Capabilities, Playable};
use crate::prefs::PreferenceStore;
use std::cell::RefCell;
use std::rc::Rc;

/// What one `trigger` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackReport {
    pub cue_played: bool,
    pub outcome: DeliveryOutcome,
}

/// Point-in-time state for the debug overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub credits: u8,
    pub recent_gesture: bool,
    pub free_handles: usize,
    pub pool_capacity: usize,
    pub last_outcome: Option<DeliveryOutcome>,
    pub haptics_enabled: bool,
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub sound_elements: usize,
    pub music_elements: usize,
}

pub struct Feedback<E: Playable + 'static> {
    clock: Rc<dyn Clock>,
    prefs: Rc<PreferenceStore>,
    gestures: Rc<RefCell<GestureCreditTracker>>,
    cascade: DeliveryCascade,
    sound: Rc<MediaManager<E>>,
    music: Rc<MediaManager<E>>,
}

impl<E: Playable + 'static> Feedback<E> {
    pub fn new(config: FeedbackConfig, caps: Capabilities) -> Self {
        let prefs = Rc::new(PreferenceStore::new(caps.store.clone(), config.namespace.clone()));
        let gestures = Rc::new(RefCell::new(GestureCreditTracker::new(&config)));
        let cascade = DeliveryCascade::new(&config, &caps, gestures.clone());
        let sound = MediaManager::new(MediaKind::Sound, prefs.clone(), config.sound_master_volume);
        let music = MediaManager::new(MediaKind::Music, prefs.clone(), config.music_master_volume);
        log::info!(
            "[feedback] ready: proxy={} vibration={} tones={} handles={}",
            caps.proxy.is_some(),
            caps.vibrator.is_some(),
            caps.tones.is_some(),
            cascade.pool().capacity()
        );
        Self {
            clock: caps.clock,
            prefs,
            gestures,
            cascade,
            sound,
            music,
        }
    }

    pub fn record_interaction(&self, kind: InteractionKind) {
        let now = self.clock.now();
        self.gestures.borrow_mut().record_interaction(kind, now);
    }

    /// Play the click cue if sound is audible, then run the haptic cascade
    /// if haptics are enabled. Never fails.
    pub async fn trigger(&self, pattern: Pattern) -> FeedbackReport {
        let cue_played = self.sound.play_cue();
        let outcome = if self.is_enabled(Channel::Haptics) {
            self.cascade.deliver(pattern).await
        } else {
            log::debug!("[feedback] haptics disabled, skipping {}", pattern);
            self.cascade.record(DeliveryOutcome::Disabled)
        };
        FeedbackReport {
            cue_played,
            outcome,
        }
    }

    pub fn is_enabled(&self, channel: Channel) -> bool {
        match MediaKind::from_channel(channel) {
            Some(kind) => self.manager(kind).is_enabled(),
            None => self.prefs.load(channel, PREFERENCE_DEFAULT),
        }
    }

    pub fn set_enabled(&self, channel: Channel, enabled: bool) {
        match MediaKind::from_channel(channel) {
            Some(kind) => self.manager(kind).set_enabled(enabled),
            None => self.prefs.save(channel, enabled),
        }
    }

    pub fn enable(&self, channel: Channel) {
        self.set_enabled(channel, true);
    }

    pub fn disable(&self, channel: Channel) {
        self.set_enabled(channel, false);
    }

    /// Flip a channel and return its new state.
    pub fn toggle(&self, channel: Channel) -> bool {
        let next = !self.is_enabled(channel);
        self.set_enabled(channel, next);
        next
    }

    pub fn register_playable(&self, element: E, channel: Channel) -> bool {
        match MediaKind::from_channel(channel) {
            Some(kind) => self.manager(kind).register(element),
            None => {
                log::warn!("[feedback] cannot register a playable on {}", channel);
                false
            }
        }
    }

    pub fn unregister_playable(&self, element: &E, channel: Channel) -> bool {
        match MediaKind::from_channel(channel) {
            Some(kind) => self.manager(kind).unregister(element),
            None => false,
        }
    }

    pub fn set_click_cue(&self, element: E) {
        self.sound.set_cue(element);
    }

    pub fn manager(&self, kind: MediaKind) -> &Rc<MediaManager<E>> {
        match kind {
            MediaKind::Sound => &self.sound,
            MediaKind::Music => &self.music,
        }
    }

    pub fn preferences(&self) -> &Rc<PreferenceStore> {
        &self.prefs
    }

    pub fn cascade(&self) -> &DeliveryCascade {
        &self.cascade
    }

    pub fn gestures(&self) -> &Rc<RefCell<GestureCreditTracker>> {
        &self.gestures
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let now = self.clock.now();
        let gestures = self.gestures.borrow();
        let pool = self.cascade.pool();
        Diagnostics {
            credits: gestures.credits(),
            recent_gesture: gestures.is_recent(now),
            free_handles: pool.free_count(),
            pool_capacity: pool.capacity(),
            last_outcome: self.cascade.last_outcome(),
            haptics_enabled: self.is_enabled(Channel::Haptics),
            sound_enabled: self.is_enabled(Channel::Sound),
            music_enabled: self.is_enabled(Channel::Music),
            sound_elements: self.sound.len(),
            music_elements: self.music.len(),
        }
    }
}
