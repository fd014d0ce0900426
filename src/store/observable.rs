//! Observable value containers.
//!
//! [`Observable<T>`] is a cloneable handle to a shared current value with
//! subscribe/unsubscribe support. Handles are cheap to clone and all clones
//! observe the same value. [`Source`] erases the value type so that a
//! [`Derived`](super::Derived) value can depend on any number of observables.
//!
//! The current value lives in a `tokio::sync::watch` channel, so async code can
//! also follow it through [`Observable::changes`]. Synchronous callbacks are
//! layered on top of the channel.
//!
//! # Notification Rules
//!
//! - `subscribe` invokes the callback once immediately with the current value
//! - `set` notifies only when the new value differs from the current one
//! - Callbacks run after the internal lock is released, so they may freely read
//!   this or any other observable
//! - [`Observable::stage`] writes a value without running callbacks; the returned
//!   [`Notification`] runs them later, which lets several observables be written
//!   before any subscriber looks at them

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<T>)>,
}

struct Shared<T> {
    value: watch::Sender<T>,
    subscribers: Mutex<Subscribers<T>>,
}

/// Callbacks owed for a value that was written by [`Observable::stage`].
///
/// Dropping it without calling [`fire`](Self::fire) skips the callbacks.
#[must_use = "subscribers are only notified when the notification is fired"]
pub struct Notification(Box<dyn FnOnce() + Send>);

impl Notification {
    /// Runs the pending callbacks.
    pub fn fire(self) {
        (self.0)();
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Notification")
    }
}

/// Shared, observable value.
///
/// # Example
///
/// ```rust
/// use launchdeck::store::Observable;
/// use std::sync::{Arc, Mutex};
///
/// let query = Observable::new(String::new());
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// let id = query.subscribe(move |q: &String| sink.lock().unwrap().push(q.clone()));
///
/// query.set("fire".to_string());
/// query.set("fire".to_string());
/// query.unsubscribe(id);
/// query.set("files".to_string());
///
/// assert_eq!(*seen.lock().unwrap(), ["", "fire"]);
/// assert_eq!(query.get(), "files");
/// ```
pub struct Observable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribers = self.subscribers().entries.len();
        f.debug_struct("Observable")
            .field("value", &*self.shared.value.borrow())
            .field("subscribers", &subscribers)
            .finish()
    }
}

impl<T> Observable<T> {
    fn subscribers(&self) -> MutexGuard<'_, Subscribers<T>> {
        self.shared.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        let (value, _) = watch::channel(value);
        Self {
            shared: Arc::new(Shared {
                value,
                subscribers: Mutex::new(Subscribers {
                    next_id: 0,
                    entries: Vec::new(),
                }),
            }),
        }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Replaces the value and notifies subscribers if it changed.
    ///
    /// Returns `true` if subscribers were notified.
    pub fn set(&self, value: T) -> bool {
        self.stage(value).map(Notification::fire).is_some()
    }

    /// Replaces the value without running callbacks.
    ///
    /// Returns the callbacks owed for the change, or `None` if the value is
    /// unchanged. Receivers from [`changes`](Self::changes) are woken right away.
    pub fn stage(&self, value: T) -> Option<Notification> {
        let subscribers = self.subscribers();
        let changed = self.shared.value.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value.clone();
            true
        });
        if !changed {
            return None;
        }

        let callbacks = subscribers
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect::<Vec<_>>();
        drop(subscribers);

        Some(Notification(Box::new(move || {
            for callback in callbacks {
                callback(&value);
            }
        })))
    }

    /// Computes a new value from the current one and [`set`](Self::set)s it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.get());
        self.set(next)
    }

    /// Registers `callback`, calling it immediately with the current value.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut subscribers = self.subscribers();
            let id = Self::register(&mut subscribers, Arc::clone(&callback));
            (id, self.get())
        };

        callback(&current);
        id
    }

    /// Registers `callback` without the initial call.
    pub(crate) fn listen(&self, callback: Callback<T>) -> SubscriptionId {
        Self::register(&mut self.subscribers(), callback)
    }

    fn register(subscribers: &mut Subscribers<T>, callback: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId(subscribers.next_id);
        subscribers.next_id += 1;
        subscribers.entries.push((id, callback));
        id
    }

    /// Removes a subscription. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers();
        let before = subscribers.entries.len();
        subscribers.entries.retain(|(sub_id, _)| *sub_id != id);
        subscribers.entries.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers().entries.len()
    }

    /// Receiver that is marked changed on every write of a different value.
    ///
    /// Async receivers are woken as each value is written, including values
    /// written by [`stage`](Self::stage) before their callbacks fire.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<T> {
        self.shared.value.subscribe()
    }
}

/// Type-erased change notifier a derived value can depend on.
pub trait Source: Send + Sync {
    /// Calls `on_change` after every change of the underlying value.
    fn watch(&self, on_change: Arc<dyn Fn() + Send + Sync>) -> SubscriptionId;

    /// Removes a watcher registered with [`watch`](Self::watch).
    fn unwatch(&self, id: SubscriptionId) -> bool;

    /// Returns another handle to the same underlying value.
    fn clone_source(&self) -> Box<dyn Source>;
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Source for Observable<T> {
    fn watch(&self, on_change: Arc<dyn Fn() + Send + Sync>) -> SubscriptionId {
        self.listen(Arc::new(move |_: &T| on_change()))
    }

    fn unwatch(&self, id: SubscriptionId) -> bool {
        self.unsubscribe(id)
    }

    fn clone_source(&self) -> Box<dyn Source> {
        Box::new(self.clone())
    }
}
