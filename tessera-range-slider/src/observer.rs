//! # Observers and teardown
//!
//! Every slider owns one [`ObserverRegistry`] and one [`CancellationToken`].
//! Observers subscribe to [`SliderEvent`]s and get a [`Subscription`] back,
//! which can release that single listener later. Tearing the slider down
//! cancels the token once; from then on no registry or binding callback fires,
//! even if a host still holds a clone of the slider's handles.

use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::callback::CallbackWith;

new_key_type! {
    /// Key of one observer in a slider's registry.
    pub struct SubscriptionKey;
}

/// Notification sent to observers.
///
/// Value events only fire when the value differs from the last one
/// notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEvent {
    /// The lower range value changed.
    FromChanged(u32),
    /// The upper range value changed.
    ToChanged(u32),
    /// The single-mode value changed.
    ValueChanged(u32),
    /// A pointer gesture ended.
    DragEnded,
}

/// Cancellation flag shared by every subscription of one slider.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token. Returns `true` only for the call that flipped it.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }

    /// Whether the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

type Observers = SlotMap<SubscriptionKey, CallbackWith<SliderEvent>>;

/// Registry of event observers for one slider instance.
#[derive(Debug)]
pub struct ObserverRegistry {
    observers: Arc<RwLock<Observers>>,
    token: CancellationToken,
}

impl ObserverRegistry {
    /// Creates an empty registry tied to `token`.
    pub fn new(token: CancellationToken) -> Self {
        Self {
            observers: Arc::new(RwLock::new(SlotMap::with_key())),
            token,
        }
    }

    /// Adds an observer. Subscribing after teardown returns an inert handle.
    pub fn subscribe(&self, observer: CallbackWith<SliderEvent>) -> Subscription {
        if self.token.is_cancelled() {
            return Subscription {
                key: SubscriptionKey::default(),
                registry: Weak::new(),
            };
        }
        let key = self.observers.write().insert(observer);
        Subscription {
            key,
            registry: Arc::downgrade(&self.observers),
        }
    }

    /// Removes an observer by key. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, key: SubscriptionKey) -> bool {
        self.observers.write().remove(key).is_some()
    }

    /// Number of live observers.
    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Whether no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers an event to every observer unless the slider was torn down.
    pub fn notify(&self, event: SliderEvent) {
        if self.token.is_cancelled() {
            return;
        }
        // Snapshot first so an observer may subscribe or unsubscribe while
        // being notified.
        let observers: SmallVec<[CallbackWith<SliderEvent>; 4]> =
            self.observers.read().values().cloned().collect();
        for observer in observers {
            if self.token.is_cancelled() {
                return;
            }
            observer.call(event);
        }
    }

    pub(crate) fn clear(&self) {
        self.observers.write().clear();
    }
}

/// Handle to one registered observer.
#[derive(Debug, Clone)]
pub struct Subscription {
    key: SubscriptionKey,
    registry: Weak<RwLock<Observers>>,
}

impl Subscription {
    /// Registry key of this observer.
    pub fn key(&self) -> SubscriptionKey {
        self.key
    }

    /// Releases the observer. Returns `false` if it was already released or
    /// the slider no longer exists.
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|observers| observers.write().remove(self.key).is_some())
    }
}
