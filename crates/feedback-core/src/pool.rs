//! Fixed pool of gesture-proxy handles.
//!
//! Handles are never queued for: `acquire` either hands out a free one or
//! returns `None`. A [`Lease`] returns its handle on a timer after it is
//! dropped, not when the sensation ends.
use crate::clock::Clock;
use crate::error::Result;
use crate::platform::{HapticProxy, ProxyHandle};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandleId(usize);

impl HandleId {
    pub fn index(self) -> usize {
        self.0
    }
}

struct Slot {
    handle: Box<dyn ProxyHandle>,
    in_use: Cell<bool>,
}

pub struct HandlePool {
    slots: Vec<Slot>,
}

impl HandlePool {
    /// Create up to `size` handles; ones the proxy fails to create are skipped.
    pub fn new(proxy: &dyn HapticProxy, size: usize) -> Self {
        let mut slots = Vec::with_capacity(size);
        for i in 0..size {
            match proxy.create_handle(i) {
                Ok(handle) => slots.push(Slot {
                    handle,
                    in_use: Cell::new(false),
                }),
                Err(e) => log::warn!("[pool] handle {} creation failed: {}", i, e),
            }
        }
        log::debug!("[pool] {} of {} handles ready", slots.len(), size);
        Self { slots }
    }

    pub fn empty() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn acquire(&self) -> Option<HandleId> {
        let (i, slot) = self
            .slots
            .iter()
            .enumerate()
            .find(|(_, s)| !s.in_use.get())?;
        slot.in_use.set(true);
        Some(HandleId(i))
    }

    pub fn release(&self, id: HandleId) {
        let Some(slot) = self.slots.get(id.0) else {
            return;
        };
        if slot.handle.is_toggled() {
            log::debug!("[pool] resetting toggled handle {}", id.0);
            slot.handle.reset();
        }
        slot.in_use.set(false);
    }

    pub fn fire(&self, id: HandleId) -> Result<()> {
        match self.slots.get(id.0) {
            Some(slot) => slot.handle.fire(),
            None => Err(crate::PlatformError::Unsupported),
        }
    }

    pub fn is_in_use(&self, id: HandleId) -> bool {
        self.slots.get(id.0).map(|s| s.in_use.get()).unwrap_or(false)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.in_use.get()).count()
    }
}

/// Exclusive use of one handle; released `settle` after drop.
pub struct Lease {
    pool: Rc<HandlePool>,
    clock: Rc<dyn Clock>,
    id: HandleId,
    settle: Duration,
}

impl Lease {
    pub fn acquire(pool: &Rc<HandlePool>, clock: &Rc<dyn Clock>, settle: Duration) -> Option<Self> {
        let id = pool.acquire()?;
        Some(Self {
            pool: pool.clone(),
            clock: clock.clone(),
            id,
            settle,
        })
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn fire(&self) -> Result<()> {
        self.pool.fire(self.id)
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        let pool = self.pool.clone();
        let id = self.id;
        self.clock
            .defer(self.settle, Box::new(move || pool.release(id)));
    }
}
