// Shared fakes for the capability traits.
#![allow(dead_code)]

use feedback_core::*;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
pub struct MemoryStore {
    pub values: RefCell<HashMap<String, String>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        if self.fail_reads.get() {
            return Err(PlatformError::Storage("unavailable".into()));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        if self.fail_writes.get() {
            return Err(PlatformError::Storage("quota exceeded".into()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHandle {
    pub fires: Cell<u32>,
    pub toggled: Cell<bool>,
    pub resets: Cell<u32>,
    pub fail: Cell<bool>,
}

pub struct SharedHandle(pub Rc<FakeHandle>);

impl ProxyHandle for SharedHandle {
    fn fire(&self) -> Result<(), PlatformError> {
        if self.0.fail.get() {
            return Err(PlatformError::Script("click threw".into()));
        }
        self.0.fires.set(self.0.fires.get() + 1);
        self.0.toggled.set(!self.0.toggled.get());
        Ok(())
    }

    fn is_toggled(&self) -> bool {
        self.0.toggled.get()
    }

    fn reset(&self) {
        self.0.toggled.set(false);
        self.0.resets.set(self.0.resets.get() + 1);
    }
}

#[derive(Default)]
pub struct FakeProxy {
    pub handles: RefCell<Vec<Rc<FakeHandle>>>,
}

impl FakeProxy {
    pub fn total_fires(&self) -> u32 {
        self.handles.borrow().iter().map(|h| h.fires.get()).sum()
    }

    pub fn fail_all(&self) {
        for h in self.handles.borrow().iter() {
            h.fail.set(true);
        }
    }
}

impl HapticProxy for FakeProxy {
    fn create_handle(&self, _id: usize) -> Result<Box<dyn ProxyHandle>, PlatformError> {
        let h = Rc::new(FakeHandle::default());
        self.handles.borrow_mut().push(h.clone());
        Ok(Box::new(SharedHandle(h)))
    }
}

#[derive(Default)]
pub struct FakeVibrator {
    pub calls: RefCell<Vec<Vec<u32>>>,
    pub deny: Cell<bool>,
}

impl Vibrator for FakeVibrator {
    fn vibrate(&self, sequence: &[u32]) -> Result<(), PlatformError> {
        if self.deny.get() {
            return Err(PlatformError::Denied("no user activation".into()));
        }
        self.calls.borrow_mut().push(sequence.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeTones {
    pub calls: RefCell<Vec<(Vec<f32>, Duration)>>,
    pub fail: Cell<bool>,
}

impl ToneSynth for FakeTones {
    fn play(&self, frequencies: &[f32], each: Duration) -> Result<(), PlatformError> {
        if self.fail.get() {
            return Err(PlatformError::Script("AudioContext closed".into()));
        }
        self.calls.borrow_mut().push((frequencies.to_vec(), each));
        Ok(())
    }
}

#[derive(Default)]
pub struct ElementState {
    pub volume: Cell<f32>,
    pub paused: Cell<bool>,
    pub plays: Cell<u32>,
    pub rewinds: Cell<u32>,
    pub reject_play: Cell<bool>,
}

/// Cloneable handle to one fake media element; clones compare equal.
#[derive(Clone)]
pub struct FakeElement(pub Rc<ElementState>);

impl FakeElement {
    pub fn new(volume: f32, playing: bool) -> Self {
        let s = ElementState::default();
        s.volume.set(volume);
        s.paused.set(!playing);
        Self(Rc::new(s))
    }

    pub fn volume_now(&self) -> f32 {
        self.0.volume.get()
    }

    pub fn playing(&self) -> bool {
        !self.0.paused.get()
    }
}

impl Playable for FakeElement {
    fn volume(&self) -> f32 {
        self.0.volume.get()
    }

    fn set_volume(&self, volume: f32) {
        self.0.volume.set(volume);
    }

    fn is_paused(&self) -> bool {
        self.0.paused.get()
    }

    fn play(&self) -> Result<(), PlatformError> {
        if self.0.reject_play.get() {
            return Err(PlatformError::Denied("autoplay blocked".into()));
        }
        self.0.paused.set(false);
        self.0.plays.set(self.0.plays.get() + 1);
        Ok(())
    }

    fn pause(&self) {
        self.0.paused.set(true);
    }

    fn rewind(&self) {
        self.0.rewinds.set(self.0.rewinds.get() + 1);
    }

    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

pub struct Rig {
    pub clock: ManualClock,
    pub store: Rc<MemoryStore>,
    pub proxy: Rc<FakeProxy>,
    pub vibrator: Rc<FakeVibrator>,
    pub tones: Rc<FakeTones>,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            clock: ManualClock::new(),
            store: Rc::new(MemoryStore::default()),
            proxy: Rc::new(FakeProxy::default()),
            vibrator: Rc::new(FakeVibrator::default()),
            tones: Rc::new(FakeTones::default()),
        }
    }

    /// Every capability present.
    pub fn full(&self) -> Capabilities {
        Capabilities {
            store: self.store.clone(),
            clock: Rc::new(self.clock.clone()),
            proxy: Some(self.proxy.clone()),
            vibrator: Some(self.vibrator.clone()),
            tones: Some(self.tones.clone()),
        }
    }

    /// Storage and clock only.
    pub fn bare(&self) -> Capabilities {
        Capabilities::minimal(self.store.clone(), Rc::new(self.clock.clone()))
    }

    pub fn feedback(&self, caps: Capabilities) -> Rc<Feedback<FakeElement>> {
        Rc::new(Feedback::new(FeedbackConfig::default(), caps))
    }
}

/// Drive `fut` to completion, jumping the clock to each pending timer.
pub fn run<T: 'static>(clock: &ManualClock, fut: impl Future<Output = T> + 'static) -> T {
    let mut pool = LocalPool::new();
    let out = Rc::new(RefCell::new(None));
    let slot = out.clone();
    pool.spawner()
        .spawn_local(async move {
            *slot.borrow_mut() = Some(fut.await);
        })
        .expect("spawn");
    loop {
        pool.run_until_stalled();
        if let Some(v) = out.borrow_mut().take() {
            return v;
        }
        match clock.next_timer_in() {
            Some(d) => clock.advance(d),
            None => panic!("future stalled with no pending timers"),
        }
    }
}

pub fn trigger(
    rig: &Rig,
    feedback: &Rc<Feedback<FakeElement>>,
    pattern: Pattern,
) -> FeedbackReport {
    let fb = feedback.clone();
    run(&rig.clock, async move { fb.trigger(pattern).await })
}

/// Collects every cascade event.
pub fn record_events(feedback: &Feedback<FakeElement>) -> Rc<RefCell<Vec<DeliveryEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    feedback
        .cascade()
        .set_observer(move |e| sink.borrow_mut().push(e.clone()));
    events
}
