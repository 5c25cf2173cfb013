//! Publish/subscribe registry for store change notifications.
//!
//! # Invariants
//! - A listener (by `Arc` identity) is registered at most once.
//! - Delivery is synchronous and follows subscription order.
//! - Each round delivers to the subscriber snapshot taken when the round
//!   starts; subscription changes made during delivery apply to the next round.

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Stable handle returned by [`ChangeNotifier::subscribe`].
pub type ListenerId = Uuid;

/// Kind of mutation that triggered a notification round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Added,
    Removed,
    Replaced,
    Reset,
}

impl ChangeEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Replaced => "replaced",
            Self::Reset => "reset",
        }
    }
}

/// Observer of store mutations.
pub trait ChangeListener: Send + Sync {
    fn on_change(&self, event: ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: Fn(ChangeEvent) + Send + Sync,
{
    fn on_change(&self, event: ChangeEvent) {
        self(event)
    }
}

struct Subscription {
    id: ListenerId,
    listener: Arc<dyn ChangeListener>,
}

/// Shared listener registry.
///
/// Cloning yields another handle to the same registry, so a listener may keep
/// a handle and unsubscribe itself from inside `on_change`.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener`, returning its id.
    ///
    /// Registering the same `Arc` again returns the existing id and does not
    /// add a second delivery.
    pub fn subscribe(&self, listener: Arc<dyn ChangeListener>) -> ListenerId {
        let mut subscriptions = self.lock();
        if let Some(existing) = subscriptions
            .iter()
            .find(|subscription| same_listener(&subscription.listener, &listener))
        {
            return existing.id;
        }

        let id = Uuid::new_v4();
        subscriptions.push(Subscription { id, listener });
        id
    }

    /// Deregisters a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut subscriptions = self.lock();
        let before = subscriptions.len();
        subscriptions.retain(|subscription| subscription.id != id);
        subscriptions.len() != before
    }

    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.lock().iter().any(|subscription| subscription.id == id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Delivers `event` to every current subscriber and returns how many
    /// listeners were called.
    pub fn notify_all(&self, event: ChangeEvent) -> usize {
        // The lock is released before delivery so listeners can (un)subscribe.
        let round: Vec<Arc<dyn ChangeListener>> = self
            .lock()
            .iter()
            .map(|subscription| Arc::clone(&subscription.listener))
            .collect();

        for listener in &round {
            listener.on_change(event);
        }
        round.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Subscription>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for ChangeNotifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.len())
            .finish()
    }
}

fn same_listener(left: &Arc<dyn ChangeListener>, right: &Arc<dyn ChangeListener>) -> bool {
    // Compare data pointers only; vtable pointers are not guaranteed unique.
    Arc::as_ptr(left) as *const () == Arc::as_ptr(right) as *const ()
}

#[cfg(test)]
mod tests {
    use super::{ChangeEvent, ChangeListener, ChangeNotifier, ListenerId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, OnceLock};

    fn counter() -> (Arc<AtomicUsize>, Arc<dyn ChangeListener>) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        let listener: Arc<dyn ChangeListener> = Arc::new(move |_event: ChangeEvent| {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        (count, listener)
    }

    #[test]
    fn subscribing_same_listener_twice_delivers_once() {
        let notifier = ChangeNotifier::new();
        let (count, listener) = counter();

        let first = notifier.subscribe(Arc::clone(&listener));
        let second = notifier.subscribe(Arc::clone(&listener));
        assert_eq!(first, second);
        assert_eq!(notifier.len(), 1);

        notifier.notify_all(ChangeEvent::Added);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_unknown_listener_is_noop() {
        let notifier = ChangeNotifier::new();
        let (_count, listener) = counter();
        notifier.subscribe(listener);

        assert!(!notifier.unsubscribe(ListenerId::new_v4()));
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn delivers_in_subscription_order() {
        let notifier = ChangeNotifier::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            notifier.subscribe(Arc::new(move |_event: ChangeEvent| {
                order.lock().unwrap().push(label);
            }));
        }

        assert_eq!(notifier.notify_all(ChangeEvent::Reset), 3);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_during_delivery_applies_to_next_round() {
        let notifier = ChangeNotifier::new();
        let (early_count, early) = counter();
        let early_id = notifier.subscribe(early);

        let remover_calls = Arc::new(AtomicUsize::new(0));
        let remover_id: Arc<OnceLock<ListenerId>> = Arc::new(OnceLock::new());
        let remover = {
            let handle = notifier.clone();
            let calls = Arc::clone(&remover_calls);
            let own_id = Arc::clone(&remover_id);
            Arc::new(move |_event: ChangeEvent| {
                calls.fetch_add(1, Ordering::SeqCst);
                handle.unsubscribe(early_id);
                if let Some(id) = own_id.get() {
                    handle.unsubscribe(*id);
                }
            })
        };
        let id = notifier.subscribe(remover);
        remover_id.set(id).unwrap();

        assert_eq!(notifier.notify_all(ChangeEvent::Added), 2);
        assert_eq!(early_count.load(Ordering::SeqCst), 1);
        assert_eq!(remover_calls.load(Ordering::SeqCst), 1);

        assert_eq!(notifier.notify_all(ChangeEvent::Added), 0);
        assert_eq!(early_count.load(Ordering::SeqCst), 1);
        assert_eq!(remover_calls.load(Ordering::SeqCst), 1);
        assert!(notifier.is_empty());
    }
}
