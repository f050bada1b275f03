//! Store contract consumed by the binding layer.
//!
//! The binding layer never owns or mutates a store. It only needs three
//! operations from it:
//!
//! - `get_state()`: a synchronous, side-effect-free snapshot
//! - `subscribe(listener)`: registration returning an unsubscribe handle
//! - `dispatch(action)`: the single mutation entry point
//!
//! Listeners are called in registration order.

mod basic;
mod reducer;

pub use basic::BasicStore;
pub use reducer::{Reducer, StoreState};

use std::sync::Arc;

use serde_json::Value;

/// Actions are plain JSON values.
pub type Action = Value;

/// Change notification callback registered with a store.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`Store::subscribe`]. Calling it removes the listener.
pub type Unsubscribe = Box<dyn FnOnce() + Send>;

/// Observable state container.
pub trait Store<S>: Send + Sync {
    /// Current state snapshot.
    fn get_state(&self) -> S;

    /// Register a change listener.
    fn subscribe(&self, listener: Listener) -> Unsubscribe;

    /// Dispatch an action; the return value is store-defined.
    fn dispatch(&self, action: Action) -> Value;
}

/// Shared, type-erased store reference.
pub type StoreRef<S> = Arc<dyn Store<S>>;
