//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storebind::host::{component_fn, ComponentTypeRef, Element};
use storebind::props::Props;
use storebind::store::{Action, Listener, Store, StoreRef, Unsubscribe};

/// A store whose state is set directly by the test.
///
/// Counts subscribe and unsubscribe calls, records dispatched actions and
/// only notifies when the test calls [`MockStore::notify`].
pub struct MockStore {
    state: Mutex<Value>,
    listeners: Arc<Mutex<Vec<(usize, Listener)>>>,
    /// Every listener ever registered, including removed ones.
    history: Mutex<Vec<Listener>>,
    subscribe_calls: AtomicUsize,
    unsubscribe_calls: Arc<AtomicUsize>,
    dispatched: Mutex<Vec<Action>>,
}

impl MockStore {
    pub fn new(state: Value) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            listeners: Arc::new(Mutex::new(Vec::new())),
            history: Mutex::new(Vec::new()),
            subscribe_calls: AtomicUsize::new(0),
            unsubscribe_calls: Arc::new(AtomicUsize::new(0)),
            dispatched: Mutex::new(Vec::new()),
        })
    }

    pub fn handle(self: &Arc<Self>) -> StoreRef<Value> {
        Arc::clone(self) as StoreRef<Value>
    }

    pub fn set_state(&self, state: Value) {
        *self.state.lock() = state;
    }

    /// Call the registered listeners in registration order.
    pub fn notify(&self) {
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener();
        }
    }

    pub fn set_state_and_notify(&self, state: Value) {
        self.set_state(state);
        self.notify();
    }

    /// Call every listener ever registered, even unsubscribed ones.
    pub fn notify_including_removed(&self) {
        let history: Vec<Listener> = self.history.lock().clone();
        for listener in history {
            listener();
        }
    }

    pub fn subscribe_count(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribe_calls.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn dispatched(&self) -> Vec<Action> {
        self.dispatched.lock().clone()
    }

    pub fn is(&self, store: &StoreRef<Value>) -> bool {
        std::ptr::addr_eq(self as *const MockStore, Arc::as_ptr(store))
    }
}

impl Store<Value> for MockStore {
    fn get_state(&self) -> Value {
        self.state.lock().clone()
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.history.lock().push(Arc::clone(&listener));
        self.listeners.lock().push((id, listener));

        let listeners = Arc::clone(&self.listeners);
        let unsubscribe_calls = Arc::clone(&self.unsubscribe_calls);
        Box::new(move || {
            unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
            listeners.lock().retain(|(entry, _)| *entry != id);
        })
    }

    fn dispatch(&self, action: Action) -> Value {
        self.dispatched.lock().push(action.clone());
        action
    }
}

/// Records every props set a component rendered with.
#[derive(Clone, Default)]
pub struct RenderLog {
    renders: Arc<Mutex<Vec<Props>>>,
}

impl RenderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    pub fn last(&self) -> Props {
        self.renders.lock().last().cloned().unwrap_or_default()
    }

    pub fn all(&self) -> Vec<Props> {
        self.renders.lock().clone()
    }
}

/// Leaf component that logs its props and renders nothing.
pub fn recorder(name: &str, log: &RenderLog) -> ComponentTypeRef {
    let log = log.clone();
    component_fn(name, move |props, _children| {
        log.renders.lock().push(props.clone());
        Vec::new()
    })
}

/// Component that renders its children unchanged.
pub fn passthrough(name: &str) -> ComponentTypeRef {
    component_fn(name, |_props, children| children.to_vec())
}

/// Props value under `key`, or null.
pub fn prop(props: &Props, key: &str) -> Value {
    props.value(key).cloned().unwrap_or(Value::Null)
}
