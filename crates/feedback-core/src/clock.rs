//! Time source abstraction and a deterministic clock for tests.
use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll, Waker};
use std::time::Duration;

/// Monotonic time plus the two kinds of timer the core needs.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
    /// A future that resolves after `delay`.
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()>;
    /// Run `callback` once after `delay`, without blocking the caller.
    fn defer(&self, delay: Duration, callback: Box<dyn FnOnce()>);
}

#[derive(Default)]
struct SleepState {
    done: bool,
    waker: Option<Waker>,
}

enum TimerAction {
    Wake(Rc<RefCell<SleepState>>),
    Call(Box<dyn FnOnce()>),
}

struct Timer {
    deadline: Duration,
    seq: u64,
    action: TimerAction,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    seq: u64,
    timers: Vec<Timer>,
}

/// Virtual clock: time only moves when [`ManualClock::advance`] is called.
///
/// Timers fire in deadline order (ties in registration order) and `now()`
/// reads each timer's deadline while it runs.
#[derive(Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, delay: Duration, action: TimerAction) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let deadline = inner.now + delay;
        let seq = inner.seq;
        inner.seq += 1;
        inner.timers.push(Timer {
            deadline,
            seq,
            action,
        });
        seq
    }

    fn pop_due(&self, until: Duration) -> Option<Timer> {
        let mut inner = self.inner.borrow_mut();
        let idx = inner
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(i, _)| i)?;
        let timer = inner.timers.swap_remove(idx);
        if timer.deadline > inner.now {
            inner.now = timer.deadline;
        }
        Some(timer)
    }

    /// Move time forward by `by`, firing every timer that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.borrow().now + by;
        while let Some(timer) = self.pop_due(target) {
            match timer.action {
                TimerAction::Wake(state) => {
                    let mut s = state.borrow_mut();
                    s.done = true;
                    if let Some(w) = s.waker.take() {
                        w.wake();
                    }
                }
                TimerAction::Call(f) => f(),
            }
        }
        self.inner.borrow_mut().now = target;
    }

    /// Deadline of the earliest pending timer, relative to now.
    pub fn next_timer_in(&self) -> Option<Duration> {
        let inner = self.inner.borrow();
        inner
            .timers
            .iter()
            .map(|t| t.deadline.saturating_sub(inner.now))
            .min()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}

struct ManualSleep {
    state: Rc<RefCell<SleepState>>,
    // Timer to cancel if the sleep is dropped before it fires
    timer: Option<(Weak<RefCell<ManualInner>>, u64)>,
}

impl Drop for ManualSleep {
    fn drop(&mut self) {
        if self.state.borrow().done {
            return;
        }
        let Some((inner, seq)) = self.timer.take() else {
            return;
        };
        if let Some(inner) = inner.upgrade() {
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.timers.retain(|t| t.seq != seq);
            }
        }
    }
}

impl Future for ManualSleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut s = self.state.borrow_mut();
        if s.done {
            Poll::Ready(())
        } else {
            s.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        let state = Rc::new(RefCell::new(SleepState::default()));
        let mut timer = None;
        if delay.is_zero() {
            state.borrow_mut().done = true;
        } else {
            let seq = self.push(delay, TimerAction::Wake(state.clone()));
            timer = Some((Rc::downgrade(&self.inner), seq));
        }
        Box::pin(ManualSleep { state, timer })
    }

    fn defer(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.push(delay, TimerAction::Call(callback));
    }
}
