//! Persisted boolean preferences with change notification.
//!
//! Reads never fail: a missing or unreadable value yields the default, and a
//! failed write is remembered in memory so the session stays consistent.
use crate::channel::{Channel, Preference};
use crate::platform::KeyValueStore;
use fnv::FnvHashMap;
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;

new_key_type! {
    /// Handle returned by [`PreferenceStore::subscribe`].
    pub struct SubscriptionId;
}

type Subscriber = Rc<dyn Fn(Preference)>;

pub struct PreferenceStore {
    backend: Rc<dyn KeyValueStore>,
    namespace: String,
    shadow: RefCell<FnvHashMap<Channel, bool>>,
    subscribers: RefCell<SlotMap<SubscriptionId, Subscriber>>,
}

fn encode(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn decode(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl PreferenceStore {
    pub fn new(backend: Rc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            shadow: RefCell::new(FnvHashMap::default()),
            subscribers: RefCell::new(SlotMap::with_key()),
        }
    }

    /// Fully qualified storage key, `"<namespace>_<key>"`.
    pub fn storage_key(&self, key: Channel) -> String {
        format!("{}_{}", self.namespace, key.storage_key())
    }

    /// A value whose write failed this session wins over whatever the
    /// backend still holds.
    pub fn load(&self, key: Channel, default: bool) -> bool {
        if let Some(v) = self.shadow.borrow().get(&key).copied() {
            return v;
        }
        let storage_key = self.storage_key(key);
        match self.backend.get(&storage_key) {
            Ok(Some(raw)) => match decode(&raw) {
                Some(v) => return v,
                None => log::warn!("[prefs] unreadable value {:?} for {}", raw, storage_key),
            },
            Ok(None) => {}
            Err(e) => log::warn!("[prefs] read {} failed: {}", storage_key, e),
        }
        default
    }

    /// Persist `value`, then notify every subscriber. Never fails; a failed
    /// write is logged and kept in memory for the rest of the session.
    pub fn save(&self, key: Channel, value: bool) {
        self.persist(key, value);
        log::debug!("[prefs] {} = {}", key, value);
        // Snapshot so subscribers may (un)subscribe while being notified
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().values().cloned().collect();
        let pref = Preference { key, value };
        for s in subscribers {
            s(pref);
        }
    }

    fn persist(&self, key: Channel, value: bool) {
        let storage_key = self.storage_key(key);
        match self.backend.set(&storage_key, encode(value)) {
            Ok(()) => {
                self.shadow.borrow_mut().remove(&key);
            }
            Err(e) => {
                log::warn!("[prefs] write {} failed: {}", storage_key, e);
                self.shadow.borrow_mut().insert(key, value);
            }
        }
    }

    pub fn subscribe(&self, callback: impl Fn(Preference) + 'static) -> SubscriptionId {
        self.subscribers.borrow_mut().insert(Rc::new(callback))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.borrow_mut().remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
