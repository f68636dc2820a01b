//! Ordered attempt of the delivery mechanisms for one feedback request.
//!
//! Gesture proxy, then vibration, then a synthesized tone. The first attempt
//! that does not fail wins; "did not fail" is all that can be observed, the
//! sensation itself is never confirmed.
use crate::clock::Clock;
use crate::config::FeedbackConfig;
use crate::error::{PlatformError, Result};
use crate::gesture::GestureCreditTracker;
use crate::pattern::Pattern;
use crate::platform::{Capabilities, ToneSynth, Vibrator};
use crate::pool::{HandlePool, Lease};
use futures::future::{self, Either};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mechanism {
    GestureProxy,
    Vibration,
    Tone,
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mechanism::GestureProxy => "gesture-proxy",
            Mechanism::Vibration => "vibration",
            Mechanism::Tone => "tone",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Unsupported,
    NoRecentGesture,
    NoCredits,
    PoolExhausted,
}

/// Stage-by-stage trace of a delivery, for tests and the debug overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryEvent {
    Skipped {
        mechanism: Mechanism,
        reason: SkipReason,
    },
    Attempted(Mechanism),
    Succeeded(Mechanism),
    Failed {
        mechanism: Mechanism,
        error: PlatformError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(Mechanism),
    /// Haptics are switched off; nothing was attempted.
    Disabled,
    /// Every mechanism was skipped or failed.
    Exhausted,
    TimedOut,
}

type Observer = Rc<dyn Fn(&DeliveryEvent)>;

pub struct DeliveryCascade {
    clock: Rc<dyn Clock>,
    pool: Rc<HandlePool>,
    proxy_supported: bool,
    vibrator: Option<Rc<dyn Vibrator>>,
    tones: Option<Rc<dyn ToneSynth>>,
    gestures: Rc<RefCell<GestureCreditTracker>>,
    settle: Duration,
    timeout: Duration,
    observer: RefCell<Option<Observer>>,
    last_outcome: Cell<Option<DeliveryOutcome>>,
}

impl DeliveryCascade {
    pub fn new(
        config: &FeedbackConfig,
        caps: &Capabilities,
        gestures: Rc<RefCell<GestureCreditTracker>>,
    ) -> Self {
        let pool = match &caps.proxy {
            Some(proxy) => HandlePool::new(proxy.as_ref(), config.pool_size),
            None => HandlePool::empty(),
        };
        Self {
            clock: caps.clock.clone(),
            pool: Rc::new(pool),
            proxy_supported: caps.proxy.is_some(),
            vibrator: caps.vibrator.clone(),
            tones: caps.tones.clone(),
            gestures,
            settle: config.settle_delay,
            timeout: config.cascade_timeout,
            observer: RefCell::new(None),
            last_outcome: Cell::new(None),
        }
    }

    pub fn set_observer(&self, observer: impl Fn(&DeliveryEvent) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub fn clear_observer(&self) {
        self.observer.borrow_mut().take();
    }

    pub fn pool(&self) -> &Rc<HandlePool> {
        &self.pool
    }

    pub fn last_outcome(&self) -> Option<DeliveryOutcome> {
        self.last_outcome.get()
    }

    pub(crate) fn record(&self, outcome: DeliveryOutcome) -> DeliveryOutcome {
        self.last_outcome.set(Some(outcome));
        outcome
    }

    fn emit(&self, event: DeliveryEvent) {
        let observer = self.observer.borrow().clone();
        if let Some(o) = observer {
            o(&event);
        }
    }

    fn skip(&self, mechanism: Mechanism, reason: SkipReason) {
        log::debug!("[cascade] skip {}: {:?}", mechanism, reason);
        self.emit(DeliveryEvent::Skipped { mechanism, reason });
    }

    fn finish(&self, mechanism: Mechanism, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                log::debug!("[cascade] delivered via {}", mechanism);
                self.emit(DeliveryEvent::Succeeded(mechanism));
                true
            }
            Err(error) => {
                match &error {
                    PlatformError::Denied(_) => {
                        log::warn!("[cascade] {} denied: {}", mechanism, error)
                    }
                    _ => log::debug!("[cascade] {} failed: {}", mechanism, error),
                }
                self.emit(DeliveryEvent::Failed { mechanism, error });
                false
            }
        }
    }

    /// Run the cascade, giving up after the configured timeout.
    pub async fn deliver(&self, pattern: Pattern) -> DeliveryOutcome {
        let attempt = self.run(pattern);
        futures::pin_mut!(attempt);
        let timeout = self.clock.sleep(self.timeout);
        let outcome = match future::select(attempt, timeout).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right(((), _)) => {
                log::warn!("[cascade] {} timed out after {:?}", pattern, self.timeout);
                DeliveryOutcome::TimedOut
            }
        };
        self.record(outcome)
    }

    async fn run(&self, pattern: Pattern) -> DeliveryOutcome {
        if self.try_gesture_proxy(pattern).await {
            return DeliveryOutcome::Delivered(Mechanism::GestureProxy);
        }
        if self.try_vibration(pattern) {
            return DeliveryOutcome::Delivered(Mechanism::Vibration);
        }
        if self.try_tone(pattern) {
            return DeliveryOutcome::Delivered(Mechanism::Tone);
        }
        log::debug!("[cascade] no mechanism delivered {}", pattern);
        DeliveryOutcome::Exhausted
    }

    async fn try_gesture_proxy(&self, pattern: Pattern) -> bool {
        let mechanism = Mechanism::GestureProxy;
        if !self.proxy_supported {
            self.skip(mechanism, SkipReason::Unsupported);
            return false;
        }
        let now = self.clock.now();
        {
            let gestures = self.gestures.borrow();
            if !gestures.is_recent(now) {
                self.skip(mechanism, SkipReason::NoRecentGesture);
                return false;
            }
            if !gestures.has_credits() {
                self.skip(mechanism, SkipReason::NoCredits);
                return false;
            }
        }
        let Some(lease) = Lease::acquire(&self.pool, &self.clock, self.settle) else {
            self.skip(mechanism, SkipReason::PoolExhausted);
            return false;
        };
        self.gestures.borrow_mut().consume();
        self.emit(DeliveryEvent::Attempted(mechanism));
        let result = self.fire_sequence(&lease, pattern).await;
        // Dropping the lease schedules the handle's return
        drop(lease);
        self.finish(mechanism, result)
    }

    async fn fire_sequence(&self, lease: &Lease, pattern: Pattern) -> Result<()> {
        let reps = pattern.repetitions();
        for i in 0..reps {
            lease.fire()?;
            if i + 1 < reps {
                self.clock.sleep(pattern.repeat_delay()).await;
            }
        }
        Ok(())
    }

    fn try_vibration(&self, pattern: Pattern) -> bool {
        let mechanism = Mechanism::Vibration;
        let Some(vibrator) = &self.vibrator else {
            self.skip(mechanism, SkipReason::Unsupported);
            return false;
        };
        self.emit(DeliveryEvent::Attempted(mechanism));
        self.finish(mechanism, vibrator.vibrate(&pattern.vibration()))
    }

    fn try_tone(&self, pattern: Pattern) -> bool {
        let mechanism = Mechanism::Tone;
        let Some(tones) = &self.tones else {
            self.skip(mechanism, SkipReason::Unsupported);
            return false;
        };
        self.emit(DeliveryEvent::Attempted(mechanism));
        self.finish(
            mechanism,
            tones.play(&pattern.tones(), pattern.tone_duration()),
        )
    }
}
