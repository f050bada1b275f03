//! Prop bags handed from parents to children.
//!
//! A [`Props`] value is an ordered map of string keys to [`PropValue`]s:
//! JSON data, shared callbacks, or a store reference. Bags are cheap to
//! clone and are never mutated once handed to a child.

mod shallow;
mod value;

pub use shallow::{changed_keys, shallow_equal};
pub use value::{Callback, Dispatch, ErasedStore, PropValue};

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::store::StoreRef;

/// Key under which an explicit store is passed in own props.
pub const STORE_KEY: &str = "store";

/// Immutable string-keyed prop bag.
#[derive(Clone, Default, Debug)]
pub struct Props {
    entries: BTreeMap<String, PropValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Attach an explicit store under [`STORE_KEY`].
    pub fn with_store<S: 'static>(self, store: StoreRef<S>) -> Self {
        self.with(STORE_KEY, ErasedStore::new(store))
    }

    /// Build a bag from a JSON object. Anything other than an object
    /// yields an empty bag.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| (key, PropValue::Value(value)))
                .collect(),
            _ => Self::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    /// JSON data under `key`, if the prop is data.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(PropValue::as_value)
    }

    /// Callback under `key`, if the prop is a function.
    pub fn callback(&self, key: &str) -> Option<&Callback> {
        self.get(key).and_then(PropValue::as_callback)
    }

    /// Invoke the callback under `key`.
    pub fn call(&self, key: &str, args: &[Value]) -> Option<Value> {
        self.callback(key).map(|callback| callback.call(args))
    }

    /// Explicit store under [`STORE_KEY`], if present.
    pub fn store(&self) -> Option<&ErasedStore> {
        self.get(STORE_KEY).and_then(PropValue::as_store)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Right-biased overlay: keys in `top` replace keys in `self`.
    pub fn overlay(&self, top: &Props) -> Props {
        let mut merged = self.clone();
        for (key, value) in &top.entries {
            merged.entries.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl PartialEq for Props {
    fn eq(&self, other: &Self) -> bool {
        shallow_equal(self, other)
    }
}

impl FromIterator<(String, PropValue)> for Props {
    fn from_iter<I: IntoIterator<Item = (String, PropValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = btree_map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
