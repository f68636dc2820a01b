//! Approximates "still inside a user-initiated interaction".
//!
//! Some mobile browsers only honour the gesture proxy when called from a
//! trusted gesture, but feedback often fires after an async hop. Credits and
//! recency let the cascade guess without the caller passing a live event.
use crate::config::FeedbackConfig;
use crate::constants::CREDIT_PER_INTERACTION;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    PointerDown,
    PointerUp,
    PointerMove,
    TouchStart,
    TouchEnd,
    TouchMove,
    MouseDown,
    MouseUp,
    MouseMove,
    KeyDown,
    KeyUp,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 11] = [
        InteractionKind::PointerDown,
        InteractionKind::PointerUp,
        InteractionKind::PointerMove,
        InteractionKind::TouchStart,
        InteractionKind::TouchEnd,
        InteractionKind::TouchMove,
        InteractionKind::MouseDown,
        InteractionKind::MouseUp,
        InteractionKind::MouseMove,
        InteractionKind::KeyDown,
        InteractionKind::KeyUp,
    ];

    /// DOM event type name.
    pub fn event_type(self) -> &'static str {
        match self {
            InteractionKind::PointerDown => "pointerdown",
            InteractionKind::PointerUp => "pointerup",
            InteractionKind::PointerMove => "pointermove",
            InteractionKind::TouchStart => "touchstart",
            InteractionKind::TouchEnd => "touchend",
            InteractionKind::TouchMove => "touchmove",
            InteractionKind::MouseDown => "mousedown",
            InteractionKind::MouseUp => "mouseup",
            InteractionKind::MouseMove => "mousemove",
            InteractionKind::KeyDown => "keydown",
            InteractionKind::KeyUp => "keyup",
        }
    }

    pub fn is_touch_edge(self) -> bool {
        matches!(self, InteractionKind::TouchStart | InteractionKind::TouchEnd)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_type())
    }
}

impl FromStr for InteractionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        InteractionKind::ALL
            .iter()
            .copied()
            .find(|k| k.event_type() == s)
            .ok_or(())
    }
}

#[derive(Clone, Debug)]
pub struct GestureCreditTracker {
    credits: u8,
    last_interaction: Option<Duration>,
    cap: u8,
    touch_weight: u8,
    recent_window: Duration,
}

impl GestureCreditTracker {
    pub fn new(config: &FeedbackConfig) -> Self {
        Self {
            credits: 0,
            last_interaction: None,
            cap: config.credit_cap,
            touch_weight: config.touch_weight,
            recent_window: config.recent_window,
        }
    }

    pub fn record_interaction(&mut self, kind: InteractionKind, now: Duration) {
        let gain = if kind.is_touch_edge() {
            self.touch_weight
        } else {
            CREDIT_PER_INTERACTION
        };
        self.credits = self.credits.saturating_add(gain).min(self.cap);
        self.last_interaction = Some(now);
    }

    /// True if the last interaction happened strictly within the window.
    pub fn is_recent(&self, now: Duration) -> bool {
        self.last_interaction
            .map(|t| now.saturating_sub(t) < self.recent_window)
            .unwrap_or(false)
    }

    pub fn has_credits(&self) -> bool {
        self.credits > 0
    }

    pub fn consume(&mut self) {
        self.credits = self.credits.saturating_sub(1);
    }

    pub fn credits(&self) -> u8 {
        self.credits
    }

    pub fn last_interaction(&self) -> Option<Duration> {
        self.last_interaction
    }
}
