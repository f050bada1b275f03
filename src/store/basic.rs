//! In-memory reference store.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use super::reducer::{Reducer, StoreState};
use super::{Action, Listener, Store, Unsubscribe};

type ReduceFn<S> = Box<dyn Fn(S, &Action) -> S + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl Listeners {
    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }
}

/// Reducer-driven store with synchronous, ordered notifications.
///
/// `dispatch` reduces under the state lock, releases every lock and then
/// notifies a snapshot of the listeners taken after the reduction.
/// Listeners subscribed during a notification round wait for the next
/// dispatch; listeners removed during a round are skipped.
pub struct BasicStore<S> {
    state: RwLock<S>,
    reducer: ReduceFn<S>,
    listeners: Arc<Mutex<Listeners>>,
}

impl<S: StoreState> BasicStore<S> {
    /// Create a store from an initial state and a reducing function.
    pub fn new(initial: S, reducer: impl Fn(S, &Action) -> S + Send + Sync + 'static) -> Self {
        Self {
            state: RwLock::new(initial),
            reducer: Box::new(reducer),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Create a store driven by a [`Reducer`] implementation.
    pub fn from_reducer<R: Reducer<State = S> + 'static>(initial: S) -> Self {
        Self::new(initial, R::reduce)
    }

    /// Move the store behind an `Arc` so it can be shared as a [`StoreRef`](super::StoreRef).
    pub fn into_ref(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().entries.len()
    }
}

impl<S: StoreState> Store<S> for BasicStore<S> {
    fn get_state(&self) -> S {
        self.state.read().clone()
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = self.listeners.lock().insert(listener);
        let listeners = Arc::downgrade(&self.listeners);
        Box::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.lock().remove(id);
            }
        })
    }

    fn dispatch(&self, action: Action) -> Value {
        {
            let mut state = self.state.write();
            let current = state.clone();
            *state = (self.reducer)(current, &action);
        }

        let snapshot: Vec<(u64, Listener)> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        tracing::trace!(listeners = snapshot.len(), "Store dispatched action");

        for (id, listener) in snapshot {
            if self.listeners.lock().contains(id) {
                listener();
            }
        }

        action
    }
}
