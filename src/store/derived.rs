//! Read-only values computed from other observables.

use super::observable::{Observable, Source, SubscriptionId};
use std::fmt;
use std::sync::Arc;

/// Value recomputed whenever any of its sources changes.
///
/// The compute closure reads its sources itself (it typically captures clones
/// of them). Nothing is cached beyond the last computed value, and subscribers
/// are notified only when the recomputed value differs. Dropping a `Derived`
/// detaches it from its sources.
///
/// # Example
///
/// ```rust
/// use launchdeck::store::{Derived, Observable};
///
/// let first = Observable::new(String::from("Ada"));
/// let last = Observable::new(String::from("Lovelace"));
///
/// let (f, l) = (first.clone(), last.clone());
/// let full = Derived::new(&[&first, &last], move || format!("{} {}", f.get(), l.get()));
/// assert_eq!(full.get(), "Ada Lovelace");
///
/// last.set("Byron".to_string());
/// assert_eq!(full.get(), "Ada Byron");
/// ```
pub struct Derived<T> {
    output: Observable<T>,
    sources: Vec<(Box<dyn Source>, SubscriptionId)>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Derived<T> {
    /// Computes the initial value and starts tracking `sources`.
    pub fn new<F>(sources: &[&dyn Source], compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let compute = Arc::new(compute);
        let output = Observable::new(compute());

        let sources = sources
            .iter()
            .map(|source| {
                let output = output.clone();
                let compute = Arc::clone(&compute);
                let id = source.watch(Arc::new(move || {
                    output.set(compute());
                }));
                (source.clone_source(), id)
            })
            .collect();

        Self { output, sources }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.output.get()
    }

    /// Registers `callback`, calling it immediately with the current value.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.output.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.output.unsubscribe(id)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.output.subscriber_count()
    }
}

impl<T> Drop for Derived<T> {
    fn drop(&mut self) {
        for (source, id) in self.sources.drain(..) {
            source.unwatch(id);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("output", &self.output)
            .field("sources", &self.sources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn recomputes_when_either_source_changes() {
        let items = Observable::new(vec![1, 2, 3, 4]);
        let min = Observable::new(0);
        let (i, m) = (items.clone(), min.clone());
        let above = Derived::new(&[&items, &min], move || {
            i.get().into_iter().filter(|v| *v > m.get()).collect::<Vec<_>>()
        });

        assert_eq!(above.get(), [1, 2, 3, 4]);
        min.set(2);
        assert_eq!(above.get(), [3, 4]);
        items.set(vec![5, 1]);
        assert_eq!(above.get(), [5]);
    }

    #[test]
    fn subscribers_see_each_distinct_result() {
        let n = Observable::new(1_u32);
        let source = n.clone();
        let parity = Derived::new(&[&n], move || source.get() % 2);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        parity.subscribe(move |p| sink.lock().unwrap().push(*p));

        n.set(3);
        n.set(4);
        n.set(6);

        assert_eq!(*seen.lock().unwrap(), [1, 0]);
    }

    #[test]
    fn compute_runs_once_per_source_change() {
        let n = Observable::new(0_u32);
        let runs = Arc::new(AtomicUsize::new(0));
        let (source, counter) = (n.clone(), Arc::clone(&runs));
        let _doubled = Derived::new(&[&n], move || {
            counter.fetch_add(1, Ordering::SeqCst);
            source.get() * 2
        });

        n.set(1);
        n.set(1);
        n.set(2);

        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn dropping_detaches_from_sources() {
        let a = Observable::new(0_u8);
        let b = Observable::new(0_u8);
        let (x, y) = (a.clone(), b.clone());
        let sum = Derived::new(&[&a, &b], move || x.get() + y.get());

        assert_eq!(a.subscriber_count(), 1);
        assert_eq!(b.subscriber_count(), 1);

        drop(sum);

        assert_eq!(a.subscriber_count(), 0);
        assert_eq!(b.subscriber_count(), 0);
    }
}
