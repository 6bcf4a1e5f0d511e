//! The set of live subscribers.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use scoreboard_core::SubscriberId;

use super::subscriber::Subscriber;
use crate::metrics::WS_CONNECTIONS_ACTIVE;

/// Identity-keyed registry of connected viewers.
///
/// Membership changes hold the write lock only for the map operation.
/// Iteration works on a copy, so a callback may add or remove entries
/// without deadlocking.
pub struct SubscriberRegistry {
    subscribers: RwLock<HashMap<SubscriberId, Arc<Subscriber>>>,
    capacity: Option<usize>,
}

impl SubscriberRegistry {
    /// Unbounded registry.
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Registry that refuses new members once `capacity` are registered.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Register a subscriber. Re-adding the same ID keeps one entry.
    pub fn add(&self, subscriber: Arc<Subscriber>) {
        let mut subs = self.subscribers.write();
        let _ = subs.insert(subscriber.id.clone(), subscriber);
        record_active(subs.len());
    }

    /// Register unless the registry is at capacity. Returns whether it was added.
    pub fn try_add(&self, subscriber: Arc<Subscriber>) -> bool {
        let mut subs = self.subscribers.write();
        if subs.contains_key(&subscriber.id) {
            return true;
        }
        if self.capacity.is_some_and(|cap| subs.len() >= cap) {
            return false;
        }
        let _ = subs.insert(subscriber.id.clone(), subscriber);
        record_active(subs.len());
        true
    }

    /// Remove a subscriber. Absent IDs are a no-op.
    pub fn remove(&self, id: &SubscriberId) -> Option<Arc<Subscriber>> {
        let mut subs = self.subscribers.write();
        let removed = subs.remove(id);
        if removed.is_some() {
            record_active(subs.len());
        }
        removed
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, id: &SubscriberId) -> bool {
        self.subscribers.read().contains_key(id)
    }

    /// Copy of the current membership.
    pub fn snapshot(&self) -> Vec<Arc<Subscriber>> {
        self.subscribers.read().values().cloned().collect()
    }

    /// Visit each subscriber registered at the time of the call.
    pub fn for_each(&self, mut f: impl FnMut(&Arc<Subscriber>)) {
        for subscriber in &self.snapshot() {
            f(subscriber);
        }
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Whether no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a new subscriber would be refused.
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.len() >= cap)
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::cast_precision_loss)]
fn record_active(count: usize) {
    metrics::gauge!(WS_CONNECTIONS_ACTIVE).set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_subscriber() -> Arc<Subscriber> {
        let (sub, _rx) = Subscriber::channel(4);
        Arc::new(sub)
    }

    #[test]
    fn add_and_remove() {
        let registry = SubscriberRegistry::new();
        let sub = make_subscriber();
        registry.add(Arc::clone(&sub));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&sub.id));

        let removed = registry.remove(&sub.id).unwrap();
        assert_eq!(removed.id, sub.id);
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_absent_is_noop() {
        let registry = SubscriberRegistry::new();
        registry.add(make_subscriber());
        assert!(registry.remove(&SubscriberId::from("sub_missing")).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_twice_is_noop() {
        let registry = SubscriberRegistry::new();
        let sub = make_subscriber();
        registry.add(Arc::clone(&sub));
        assert!(registry.remove(&sub.id).is_some());
        assert!(registry.remove(&sub.id).is_none());
    }

    #[test]
    fn re_adding_same_subscriber_keeps_one_entry() {
        let registry = SubscriberRegistry::new();
        let sub = make_subscriber();
        registry.add(Arc::clone(&sub));
        registry.add(Arc::clone(&sub));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn try_add_respects_capacity() {
        let registry = SubscriberRegistry::with_capacity(Some(2));
        assert!(registry.try_add(make_subscriber()));
        assert!(registry.try_add(make_subscriber()));
        assert!(registry.is_full());
        assert!(!registry.try_add(make_subscriber()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn try_add_unbounded_always_succeeds() {
        let registry = SubscriberRegistry::new();
        for _ in 0..10 {
            assert!(registry.try_add(make_subscriber()));
        }
        assert!(!registry.is_full());
    }

    #[test]
    fn for_each_visits_every_member() {
        let registry = SubscriberRegistry::new();
        for _ in 0..3 {
            registry.add(make_subscriber());
        }
        let mut visited = 0;
        registry.for_each(|_| visited += 1);
        assert_eq!(visited, 3);
    }

    #[test]
    fn for_each_may_remove_during_iteration() {
        let registry = SubscriberRegistry::new();
        for _ in 0..3 {
            registry.add(make_subscriber());
        }
        registry.for_each(|sub| {
            let _ = registry.remove(&sub.id);
        });
        assert!(registry.is_empty());
    }

    #[test]
    fn add_during_iteration_is_not_visited() {
        let registry = SubscriberRegistry::new();
        registry.add(make_subscriber());
        let mut visited = 0;
        registry.for_each(|_| {
            visited += 1;
            registry.add(make_subscriber());
        });
        assert_eq!(visited, 1);
        assert_eq!(registry.len(), 2);
    }
}
