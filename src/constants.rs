// DOM hooks and browser tuning used by the web frontend.

// Hidden container holding the pooled switch controls
pub const HAPTIC_POOL_ID: &str = "feedback-haptic-pool";
pub const HAPTIC_POOL_STYLE: &str =
    "position:fixed;left:-9999px;top:0;width:1px;height:1px;opacity:0;pointer-events:none;overflow:hidden";

// Debug overlay
pub const DEBUG_OVERLAY_ID: &str = "feedback-debug";
pub const DEBUG_OVERLAY_STYLE: &str = "position:fixed;right:8px;bottom:8px;z-index:99999;color:#cfe7ff;font:12px ui-monospace,monospace;background:rgba(10,14,24,0.85);padding:8px 12px;border-radius:6px;border:1px solid rgba(80,110,150,0.35);white-space:pre";

// Attributes read from the page
pub const TOGGLE_ATTR: &str = "data-feedback-toggle"; // value: haptics | sound | music
pub const NAMESPACE_ATTR: &str = "data-feedback-namespace"; // on <body> or <html>
pub const TOGGLE_OFF_CLASS: &str = "feedback-off";

// Tone synthesis envelope (seconds)
pub const TONE_START_OFFSET_SEC: f64 = 0.005;
pub const TONE_ATTACK_SEC: f64 = 0.01;
pub const TONE_STOP_PAD_SEC: f64 = 0.05;

// First iOS release whose switch control produces a haptic tick
pub const SWITCH_HAPTICS_MIN_IOS: (u32, u32) = (17, 4);
