use crate::constants::*;
use std::time::Duration;

/// Runtime configuration for the feedback services.
///
/// `Default` mirrors the values in [`crate::constants`]; collaborators only
/// override what they need.
#[derive(Clone, Debug)]
pub struct FeedbackConfig {
    /// Prefix for persisted keys, stored as `"<namespace>_<key>"`.
    pub namespace: String,
    pub pool_size: usize,
    /// Delay between the end of a primary attempt and its handle becoming free.
    pub settle_delay: Duration,
    pub recent_window: Duration,
    pub credit_cap: u8,
    pub touch_weight: u8,
    pub cascade_timeout: Duration,
    pub sound_master_volume: f32,
    pub music_master_volume: f32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            namespace: STORAGE_NAMESPACE.to_string(),
            pool_size: HANDLE_POOL_SIZE,
            settle_delay: HANDLE_SETTLE_DELAY,
            recent_window: RECENT_INTERACTION_WINDOW,
            credit_cap: CREDIT_CAP,
            touch_weight: CREDIT_PER_TOUCH,
            cascade_timeout: CASCADE_TIMEOUT,
            sound_master_volume: DEFAULT_MASTER_VOLUME,
            music_master_volume: DEFAULT_MASTER_VOLUME,
        }
    }
}

impl FeedbackConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}
