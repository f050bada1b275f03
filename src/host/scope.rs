//! Ancestor-provided stores.
//!
//! A [`Scope`] is handed down through construction and carries the store
//! of the nearest enclosing [`Provider`]. A provider hands its subtree a
//! new scope; the parent's scope is never modified.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use crate::connect::ConnectError;
use crate::props::{ErasedStore, Props};
use crate::store::StoreRef;

use super::{ComponentType, ComponentTypeRef, Element, Instance, MountContext};

#[derive(Clone, Default)]
pub struct Scope {
    store: Option<ErasedStore>,
}

impl Scope {
    /// Scope with no provided store.
    pub fn root() -> Self {
        Self::default()
    }

    /// Child scope where `store` shadows every ancestor store.
    pub fn provide(&self, store: ErasedStore) -> Scope {
        Scope { store: Some(store) }
    }

    pub fn nearest_store(&self) -> Option<&ErasedStore> {
        self.store.as_ref()
    }
}

/// Makes a store available to every connected descendant.
///
/// The store is fixed at mount. Handing a mounted provider a different
/// store logs a warning and keeps the original.
pub struct Provider;

impl Provider {
    /// The single provider component type.
    pub fn component_type() -> ComponentTypeRef {
        static TYPE: OnceLock<ComponentTypeRef> = OnceLock::new();
        Arc::clone(TYPE.get_or_init(|| Arc::new(ProviderType)))
    }

    pub fn element<S: 'static>(store: StoreRef<S>, child: Element) -> Element {
        Element::new(Self::component_type(), Props::new().with_store(store)).with_child(child)
    }
}

struct ProviderType;

struct ProviderInstance {
    store: ErasedStore,
}

impl ComponentType for ProviderType {
    fn name(&self) -> String {
        "Provider".to_string()
    }

    fn instantiate(
        &self,
        props: &Props,
        _ctx: &MountContext,
    ) -> Result<Box<dyn Instance>, ConnectError> {
        let store = props.store().cloned().ok_or_else(|| ConnectError::MissingStore {
            component: self.name(),
        })?;
        Ok(Box::new(ProviderInstance { store }))
    }
}

impl Instance for ProviderInstance {
    fn should_update(&mut self, _prev: &Props, next: &Props) -> Result<bool, ConnectError> {
        if next.store().is_some_and(|store| !store.same_store(&self.store)) {
            tracing::warn!(
                current = ?self.store,
                "Provider does not support changing the store after mount, keeping the original"
            );
        }
        Ok(true)
    }

    fn render(&mut self, _props: &Props, children: &[Element]) -> Result<Vec<Element>, ConnectError> {
        Ok(children.to_vec())
    }

    fn child_scope(&self, scope: &Scope) -> Scope {
        scope.provide(self.store.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
