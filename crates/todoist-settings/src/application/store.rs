//! ConfigurationStore: the live settings snapshot and its subscribers.
//!
//! The store owns exactly one [`Settings`] value at a time, wrapped in an
//! `Arc` so readers can hold on to a snapshot without copying it.  A commit
//! never edits the snapshot in place: it swaps in a new `Arc` and then calls
//! every subscriber with the new value.
//!
//! # Delivery guarantees
//!
//! - A new subscriber is called once, immediately, with the snapshot current
//!   at registration time.
//! - After that it is called once per commit, in commit order.  No commit is
//!   skipped and none is delivered twice.
//! - [`commit`](ConfigurationStore::commit) returns only after every
//!   subscriber has been called.
//!
//! Commits and registrations are serialized by a delivery lock so the
//! guarantees hold even if two threads commit at once.
//!
//! # Unsubscribing
//!
//! Each subscriber has its own call lock, held while its callback runs.
//! [`Subscription::unsubscribe`] takes that lock, so once it returns the
//! callback is not running and will not be called again, even if another
//! thread is part-way through delivering a commit.
//!
//! # Reentrancy
//!
//! Both locks are reentrant for the delivering thread.  A callback may call
//! [`subscribe`](ConfigurationStore::subscribe): the new subscriber gets the
//! snapshot being delivered as its initial snapshot and is not called again
//! for that commit.  A callback may also unsubscribe itself or others.  A
//! callback must not call [`commit`](ConfigurationStore::commit) on the same
//! store; that does not deadlock, but subscribers later in the list would see
//! the two snapshots out of order.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};
use todoist_settings_core::{Settings, SettingsError};
use tracing::debug;

/// One registered callback.
struct Observer {
    callback: Box<dyn Fn(&Settings) + Send + Sync>,
    /// Held for the duration of each call; `false` once unsubscribed.
    live: ReentrantMutex<Cell<bool>>,
}

impl Observer {
    fn deliver(&self, settings: &Settings) {
        let live = self.live.lock();
        if live.get() {
            (self.callback)(settings);
        }
    }

    /// Waits for a call in progress on another thread, then stops delivery.
    fn retire(&self) {
        self.live.lock().set(false);
    }
}

struct State {
    current: Arc<Settings>,
    observers: Vec<(u64, Arc<Observer>)>,
    next_id: u64,
}

struct Inner {
    state: Mutex<State>,
    delivery: ReentrantMutex<()>,
}

/// Reactive container for the plugin's single live [`Settings`] snapshot.
pub struct ConfigurationStore {
    inner: Arc<Inner>,
}

impl ConfigurationStore {
    /// Creates a store seeded with `initial`.
    pub fn new(initial: Settings) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    current: Arc::new(initial),
                    observers: Vec::new(),
                    next_id: 0,
                }),
                delivery: ReentrantMutex::new(()),
            }),
        }
    }

    /// Returns the current snapshot.
    pub fn get(&self) -> Arc<Settings> {
        Arc::clone(&self.inner.state.lock().current)
    }

    /// Registers `observer` and immediately calls it with the current snapshot.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Settings) + Send + Sync + 'static,
    {
        let _delivery = self.inner.delivery.lock();
        let observer = Arc::new(Observer {
            callback: Box::new(observer),
            live: ReentrantMutex::new(Cell::new(true)),
        });

        let (id, snapshot) = {
            let mut state = self.inner.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.observers.push((id, Arc::clone(&observer)));
            (id, Arc::clone(&state.current))
        };

        observer.deliver(&snapshot);

        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
            active: AtomicBool::new(true),
        }
    }

    /// Replaces the live snapshot and notifies every subscriber before returning.
    ///
    /// Returns the newly committed snapshot.
    ///
    /// # Errors
    ///
    /// Returns the [`SettingsError`] from [`Settings::validate`] if `settings`
    /// breaks a field constraint.  The snapshot is left unchanged and no
    /// subscriber is called.
    pub fn commit(&self, settings: Settings) -> Result<Arc<Settings>, SettingsError> {
        settings.validate()?;

        let _delivery = self.inner.delivery.lock();

        let (snapshot, observers) = {
            let mut state = self.inner.state.lock();
            state.current = Arc::new(settings);
            let observers: Vec<Arc<Observer>> =
                state.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
            (Arc::clone(&state.current), observers)
        };

        debug!("settings committed; notifying {} subscriber(s)", observers.len());
        for observer in observers {
            observer.deliver(&snapshot);
        }
        Ok(snapshot)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().observers.len()
    }
}

/// Handle returned by [`ConfigurationStore::subscribe`].
///
/// Dropping the handle does NOT unsubscribe; call
/// [`unsubscribe`](Subscription::unsubscribe) to stop delivery.
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    store: Weak<Inner>,
    id: u64,
    active: AtomicBool,
}

impl Subscription {
    /// Stops delivery to this subscriber.  Further calls are no-ops.
    ///
    /// If another thread is running this subscriber's callback, waits for it
    /// to return.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        let Some(inner) = self.store.upgrade() else {
            return;
        };
        let removed = {
            let mut state = inner.state.lock();
            let index = state.observers.iter().position(|(id, _)| *id == self.id);
            index.map(|i| state.observers.remove(i).1)
        };
        if let Some(observer) = removed {
            observer.retire();
        }
    }

    /// `true` until [`unsubscribe`](Subscription::unsubscribe) is called.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{mpsc, Mutex};
    use std::thread;
    use std::time::Duration;

    /// Subscribes a recorder that captures every delivered interval.
    fn record_intervals(store: &ConfigurationStore) -> (Subscription, Arc<Mutex<Vec<u32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(move |s| sink.lock().unwrap().push(s.auto_refresh_interval));
        (sub, seen)
    }

    fn with_interval(seconds: u32) -> Settings {
        Settings {
            auto_refresh_interval: seconds,
            ..Settings::default()
        }
    }

    #[test]
    fn test_get_returns_initial_snapshot() {
        let store = ConfigurationStore::new(with_interval(30));
        assert_eq!(store.get().auto_refresh_interval, 30);
    }

    #[test]
    fn test_subscribe_delivers_current_snapshot_immediately() {
        // Arrange
        let store = ConfigurationStore::new(with_interval(30));

        // Act
        let (_sub, seen) = record_intervals(&store);

        // Assert
        assert_eq!(*seen.lock().unwrap(), vec![30]);
    }

    #[test]
    fn test_subscriber_sees_every_commit_in_order_without_duplicates() {
        // Arrange
        let store = ConfigurationStore::new(Settings::default());
        let (_sub, seen) = record_intervals(&store);

        // Act
        for seconds in [10, 20, 20, 5] {
            store.commit(with_interval(seconds)).unwrap();
        }

        // Assert: initial snapshot + one entry per commit
        assert_eq!(*seen.lock().unwrap(), vec![60, 10, 20, 20, 5]);
    }

    #[test]
    fn test_late_subscriber_starts_from_snapshot_at_registration() {
        let store = ConfigurationStore::new(Settings::default());
        store.commit(with_interval(15)).unwrap();

        let (_sub, seen) = record_intervals(&store);
        store.commit(with_interval(16)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![15, 16]);
    }

    #[test]
    fn test_commit_replaces_snapshot_instead_of_mutating_it() {
        // Arrange
        let store = ConfigurationStore::new(Settings::default());
        let before = store.get();

        // Act
        store.commit(with_interval(99)).unwrap();

        // Assert: the old Arc still holds the old value
        assert_eq!(before.auto_refresh_interval, 60);
        assert_eq!(store.get().auto_refresh_interval, 99);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let store = ConfigurationStore::new(Settings::default());
        let (sub, seen) = record_intervals(&store);

        sub.unsubscribe();
        store.commit(with_interval(1)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![60]);
        assert_eq!(store.subscriber_count(), 0);
        assert!(!sub.is_active());
    }

    #[test]
    fn test_unsubscribe_twice_is_a_noop() {
        // Arrange: two subscribers so a buggy second call could remove the wrong one
        let store = ConfigurationStore::new(Settings::default());
        let (first, _) = record_intervals(&store);
        let (_second, seen_second) = record_intervals(&store);

        // Act
        first.unsubscribe();
        first.unsubscribe();
        store.commit(with_interval(7)).unwrap();

        // Assert
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(*seen_second.lock().unwrap(), vec![60, 7]);
    }

    #[test]
    fn test_unsubscribe_after_store_dropped_does_not_panic() {
        let store = ConfigurationStore::new(Settings::default());
        let (sub, _) = record_intervals(&store);
        drop(store);
        sub.unsubscribe();
    }

    #[test]
    fn test_dropping_subscription_keeps_delivery() {
        let store = ConfigurationStore::new(Settings::default());
        let (sub, seen) = record_intervals(&store);
        drop(sub);

        store.commit(with_interval(8)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![60, 8]);
    }

    #[test]
    fn test_subscriber_may_unsubscribe_itself_from_callback() {
        // Arrange
        let store = ConfigurationStore::new(Settings::default());
        let handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(Mutex::new(0u32));

        let handle_in_cb = Arc::clone(&handle);
        let calls_in_cb = Arc::clone(&calls);
        let sub = store.subscribe(move |_| {
            *calls_in_cb.lock().unwrap() += 1;
            if let Some(sub) = handle_in_cb.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        });
        *handle.lock().unwrap() = Some(sub);

        // Act
        store.commit(with_interval(2)).unwrap();
        store.commit(with_interval(3)).unwrap();

        // Assert: initial delivery + the commit that triggered unsubscribe
        assert_eq!(*calls.lock().unwrap(), 2);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_concurrent_commits_reach_subscriber_in_commit_order() {
        // Arrange
        let store = Arc::new(ConfigurationStore::new(Settings::default()));
        let (_sub, seen) = record_intervals(&store);

        // Act
        let workers: Vec<_> = (1..=4u32)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25u32 {
                        store.commit(with_interval(t * 1000 + i + 1)).unwrap();
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        // Assert: every commit delivered once; each thread's commits in order;
        // the last delivery is the final snapshot
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1 + 100);
        for t in 1..=4u32 {
            let mine: Vec<u32> = seen.iter().copied().filter(|v| v / 1000 == t).collect();
            let expected: Vec<u32> = (0..25).map(|i| t * 1000 + i + 1).collect();
            assert_eq!(mine, expected);
        }
        assert_eq!(*seen.last().unwrap(), store.get().auto_refresh_interval);
    }

    #[test]
    fn test_commit_rejects_invalid_record_without_notifying() {
        // Arrange
        let store = ConfigurationStore::new(with_interval(30));
        let (_sub, seen) = record_intervals(&store);

        // Act
        let result = store.commit(with_interval(0));

        // Assert
        assert_eq!(result, Err(SettingsError::InvalidAutoRefreshInterval(0)));
        assert_eq!(store.get().auto_refresh_interval, 30);
        assert_eq!(*seen.lock().unwrap(), vec![30]);
    }

    #[test]
    fn test_subscriber_may_subscribe_from_callback() {
        // Arrange: on interval 5 the outer callback registers a second subscriber
        let store = Arc::new(ConfigurationStore::new(Settings::default()));
        let nested_seen = Arc::new(Mutex::new(Vec::new()));
        let nested_subs: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

        let weak_store = Arc::downgrade(&store);
        let sink = Arc::clone(&nested_seen);
        let keep = Arc::clone(&nested_subs);
        let _outer = store.subscribe(move |s| {
            if s.auto_refresh_interval != 5 {
                return;
            }
            if let Some(store) = weak_store.upgrade() {
                let sink = Arc::clone(&sink);
                let sub = store.subscribe(move |s| sink.lock().unwrap().push(s.auto_refresh_interval));
                keep.lock().unwrap().push(sub);
            }
        });

        // Act: commit on a worker so a hang fails the test instead of blocking it
        let (done_tx, done_rx) = mpsc::channel();
        let worker = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.commit(with_interval(5)).unwrap();
                store.commit(with_interval(6)).unwrap();
                done_tx.send(()).unwrap();
            })
        };

        // Assert: the nested subscriber starts at 5 exactly once, then sees 6
        done_rx
            .recv_timeout(Duration::from_secs(3))
            .expect("commit returned while a callback subscribed");
        worker.join().unwrap();
        assert_eq!(*nested_seen.lock().unwrap(), vec![5, 6]);
        assert_eq!(store.subscriber_count(), 2);
    }

    #[test]
    fn test_unsubscribe_during_delivery_on_another_thread_stops_pending_call() {
        // Arrange: the first subscriber parks delivery of interval 7 until released
        let store = Arc::new(ConfigurationStore::new(Settings::default()));
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Mutex::new(release_rx);
        let _gate = store.subscribe(move |s| {
            if s.auto_refresh_interval == 7 {
                entered_tx.send(()).unwrap();
                release_rx.lock().unwrap().recv().unwrap();
            }
        });

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let late = store.subscribe(move |s| {
            if s.auto_refresh_interval == 7 {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let committer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.commit(with_interval(7)).unwrap();
            })
        };
        entered_rx
            .recv_timeout(Duration::from_secs(3))
            .expect("delivery of 7 started");

        // Act
        late.unsubscribe();
        release_tx.send(()).unwrap();
        committer.join().unwrap();

        // Assert
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_unsubscribe_waits_for_running_callback() {
        // Arrange: the subscriber blocks inside its callback for interval 9
        let store = Arc::new(ConfigurationStore::new(Settings::default()));
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Mutex::new(release_rx);
        let finished = Arc::new(AtomicBool::new(false));
        let finished_in_cb = Arc::clone(&finished);
        let sub = Arc::new(store.subscribe(move |s| {
            if s.auto_refresh_interval == 9 {
                entered_tx.send(()).unwrap();
                release_rx.lock().unwrap().recv().unwrap();
                finished_in_cb.store(true, Ordering::SeqCst);
            }
        }));

        let committer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.commit(with_interval(9)).unwrap();
            })
        };
        entered_rx
            .recv_timeout(Duration::from_secs(3))
            .expect("delivery of 9 started");

        // Act
        let unsubscriber = {
            let sub = Arc::clone(&sub);
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                sub.unsubscribe();
                finished.load(Ordering::SeqCst)
            })
        };
        thread::sleep(Duration::from_millis(50));
        release_tx.send(()).unwrap();

        // Assert: unsubscribe returned only after the callback completed
        assert!(unsubscriber.join().unwrap());
        committer.join().unwrap();
        assert_eq!(store.subscriber_count(), 0);
    }
}
