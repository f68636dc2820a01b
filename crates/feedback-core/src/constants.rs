//! Feedback tuning constants.
//!
//! These express intended behavior (windows, caps, delays) and keep magic
//! numbers out of the delivery and media code.
use std::time::Duration;

// Gesture credits
pub const CREDIT_CAP: u8 = 100;
pub const CREDIT_PER_INTERACTION: u8 = 1;
pub const CREDIT_PER_TOUCH: u8 = 2; // touch start/end weigh double (mobile first)
pub const RECENT_INTERACTION_WINDOW: Duration = Duration::from_secs(30);

// Delivery handle pool
pub const HANDLE_POOL_SIZE: usize = 20;
pub const HANDLE_SETTLE_DELAY: Duration = Duration::from_millis(500);

// Whole-cascade budget; the longest pattern finishes well inside it
pub const CASCADE_TIMEOUT: Duration = Duration::from_secs(3);

// Synthesized tone fallback
pub const TONE_DURATION: Duration = Duration::from_millis(100);
pub const LONG_TONE_DURATION: Duration = Duration::from_millis(800);
pub const TONE_GAIN: f32 = 0.15;

// Preferences
pub const STORAGE_NAMESPACE: &str = "feedback";
pub const PREFERENCE_DEFAULT: bool = true;

// Media managers
pub const DEFAULT_MASTER_VOLUME: f32 = 1.0;
