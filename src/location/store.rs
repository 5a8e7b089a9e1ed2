use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use super::history::MemoryHistory;

/// The location value observed by every route at one logical instant.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSnapshot {
    pub pathname: String,
    pub search: String,
    pub state: Value,
    pub epoch: u64,
}

pub type SubscriptionId = u64;

type SubscriberFn = Arc<dyn Fn(&LocationSnapshot) + Send + Sync>;

struct SubscriberInfo {
    id: SubscriptionId,
    callback: SubscriberFn,
}

struct LocationInner {
    history: MemoryHistory,
    epoch: u64,
    next_subscription: SubscriptionId,
}

/// Shared reactive wrapper over the navigation history.
///
/// Every committed navigation updates the snapshot, bumps the epoch, and
/// then notifies subscribers in registration order. Derived route state is
/// memoized against the epoch, so a single store write is observed
/// consistently by every route sharing the store.
pub struct LocationStore {
    inner: RwLock<LocationInner>,
    subscribers: RwLock<Vec<SubscriberInfo>>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::with_initial("/")
    }

    pub fn with_initial(url: &str) -> Self {
        Self {
            inner: RwLock::new(LocationInner {
                history: MemoryHistory::new(url),
                epoch: 0,
                next_subscription: 0,
            }),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.inner.read().epoch
    }

    /// Number of entries in the backing history stack.
    pub fn len(&self) -> usize {
        self.inner.read().history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().history.is_empty()
    }

    pub fn snapshot(&self) -> LocationSnapshot {
        let guard = self.inner.read();
        let entry = guard.history.current();
        let (pathname, search) = split_url(&entry.url);
        LocationSnapshot {
            pathname: pathname.to_string(),
            search: search.to_string(),
            state: entry.state.clone(),
            epoch: guard.epoch,
        }
    }

    pub fn pathname(&self) -> String {
        self.snapshot().pathname
    }

    pub fn search(&self) -> String {
        self.snapshot().search
    }

    pub fn state(&self) -> Value {
        self.inner.read().history.current().state.clone()
    }

    pub fn push(&self, url: &str, state: Value) {
        tracing::debug!(url, "push location");
        self.commit(|history| history.push(url.to_string(), state));
    }

    pub fn replace(&self, url: &str, state: Value) {
        tracing::debug!(url, "replace location");
        self.commit(|history| history.replace(url.to_string(), state));
    }

    pub fn back(&self) -> bool {
        self.commit_navigation(MemoryHistory::back)
    }

    pub fn forward(&self) -> bool {
        self.commit_navigation(MemoryHistory::forward)
    }

    pub fn subscribe(&self, callback: SubscriberFn) -> SubscriptionId {
        let id = {
            let mut guard = self.inner.write();
            guard.next_subscription += 1;
            guard.next_subscription
        };
        self.subscribers.write().push(SubscriberInfo { id, callback });
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.write().retain(|info| info.id != id);
    }

    fn commit(&self, apply: impl FnOnce(&mut MemoryHistory)) {
        {
            let mut guard = self.inner.write();
            apply(&mut guard.history);
            guard.epoch += 1;
        }
        self.notify();
    }

    fn commit_navigation(&self, apply: impl FnOnce(&mut MemoryHistory) -> bool) -> bool {
        let moved = {
            let mut guard = self.inner.write();
            let moved = apply(&mut guard.history);
            if moved {
                guard.epoch += 1;
            }
            moved
        };
        if moved {
            self.notify();
        }
        moved
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        // callbacks run outside the lock so they may subscribe or navigate
        let callbacks: Vec<SubscriberFn> = self
            .subscribers
            .read()
            .iter()
            .map(|info| Arc::clone(&info.callback))
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.inner.read();
        f.debug_struct("LocationStore")
            .field("current", guard.history.current())
            .field("epoch", &guard.epoch)
            .finish()
    }
}

fn split_url(url: &str) -> (&str, &str) {
    let without_fragment = match url.find('#') {
        Some(index) => &url[..index],
        None => url,
    };
    match without_fragment.find('?') {
        Some(index) => (&without_fragment[..index], &without_fragment[index..]),
        None => (without_fragment, ""),
    }
}
