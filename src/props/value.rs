//! Individual prop values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::store::{Action, StoreRef};

type CallbackFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Shared function prop. Compared by identity.
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// True when both handles point at the same function.
    pub fn ptr_eq(&self, other: &Callback) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0))
    }
}

/// A store's dispatch entry point, packaged as a prop.
///
/// As a [`Callback`], the first argument is the action; a missing argument
/// dispatches `null`.
#[derive(Clone, Debug)]
pub struct Dispatch(Callback);

impl Dispatch {
    pub fn new<S: 'static>(store: &StoreRef<S>) -> Self {
        let store = Arc::clone(store);
        Self(Callback::new(move |args| {
            store.dispatch(args.first().cloned().unwrap_or(Value::Null))
        }))
    }

    pub fn call(&self, action: Action) -> Value {
        self.0.call(std::slice::from_ref(&action))
    }

    pub fn as_callback(&self) -> &Callback {
        &self.0
    }
}

/// A store reference carried inside a prop bag.
///
/// Identity is the address of the underlying store, so re-wrapping the
/// same store yields an equal value.
#[derive(Clone)]
pub struct ErasedStore {
    store: Arc<dyn Any + Send + Sync>,
    addr: usize,
}

impl ErasedStore {
    pub fn new<S: 'static>(store: StoreRef<S>) -> Self {
        let addr = Arc::as_ptr(&store) as *const () as usize;
        Self {
            store: Arc::new(store),
            addr,
        }
    }

    /// Recover the typed store, if it holds state of type `S`.
    pub fn downcast<S: 'static>(&self) -> Option<StoreRef<S>> {
        self.store.downcast_ref::<StoreRef<S>>().cloned()
    }

    pub fn same_store(&self, other: &ErasedStore) -> bool {
        self.addr == other.addr
    }
}

impl fmt::Debug for ErasedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Store({:#x})", self.addr)
    }
}

/// A single prop.
#[derive(Clone, Debug)]
pub enum PropValue {
    Value(Value),
    Callback(Callback),
    Store(ErasedStore),
}

impl PropValue {
    /// Shallow equality: data compares by value, callbacks and stores by identity.
    pub fn same(&self, other: &PropValue) -> bool {
        match (self, other) {
            (PropValue::Value(a), PropValue::Value(b)) => a == b,
            (PropValue::Callback(a), PropValue::Callback(b)) => a.ptr_eq(b),
            (PropValue::Store(a), PropValue::Store(b)) => a.same_store(b),
            _ => false,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PropValue::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            PropValue::Callback(callback) => Some(callback),
            _ => None,
        }
    }

    pub fn as_store(&self) -> Option<&ErasedStore> {
        match self {
            PropValue::Store(store) => Some(store),
            _ => None,
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::Value(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<Callback> for PropValue {
    fn from(callback: Callback) -> Self {
        PropValue::Callback(callback)
    }
}

impl From<Dispatch> for PropValue {
    fn from(dispatch: Dispatch) -> Self {
        PropValue::Callback(dispatch.0)
    }
}

impl From<ErasedStore> for PropValue {
    fn from(store: ErasedStore) -> Self {
        PropValue::Store(store)
    }
}
