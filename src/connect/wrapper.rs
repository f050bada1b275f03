//! The component type produced by [`Connector::wrap`](super::Connector::wrap).

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ConnectOptions;
use crate::host::{ComponentType, ComponentTypeRef, Element, Instance, MountContext, NodeId};
use crate::props::Props;
use crate::store::{StoreRef, StoreState};

use super::binding::{store_listener, Binding};
use super::factory::ConnectConfig;
use super::resolver::resolve_store;
use super::subscription::{Subscription, SubscriptionPhase};
use super::ConnectError;

/// Wrapper component type. Each [`Connector::wrap`](super::Connector::wrap)
/// call yields a distinct one.
pub struct ConnectedType<S> {
    name: String,
    inner: ComponentTypeRef,
    config: Arc<ConnectConfig<S>>,
}

impl<S: StoreState> ConnectedType<S> {
    pub(crate) fn new(inner: ComponentTypeRef, config: Arc<ConnectConfig<S>>) -> Self {
        Self {
            name: format!("Connect({})", inner.name()),
            inner,
            config,
        }
    }

    /// The component this type wraps.
    pub fn wrapped_type(&self) -> &ComponentTypeRef {
        &self.inner
    }

    pub fn options(&self) -> ConnectOptions {
        self.config.options
    }
}

impl<S: StoreState> ComponentType for ConnectedType<S> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn instantiate(
        &self,
        props: &Props,
        ctx: &MountContext,
    ) -> Result<Box<dyn Instance>, ConnectError> {
        let store = resolve_store::<S>(props, &ctx.scope, &self.name)?;
        let binding = Binding::new(
            self.name.clone(),
            Arc::clone(&store),
            Arc::clone(&self.config),
            props,
        )?;
        let binding = Arc::new(Mutex::new(binding));

        let mut subscription = Subscription::new();
        if self.config.map_state.is_some() {
            subscription.subscribe(&store, store_listener(&binding, ctx.node, ctx.queue.clone()));
            tracing::debug!(component = %self.name, node = %ctx.node, "Subscribed to store");
        }

        Ok(Box::new(ConnectedInstance {
            component: self.name.clone(),
            node: ctx.node,
            inner: Arc::clone(&self.inner),
            store,
            binding,
            subscription,
        }))
    }
}

/// A mounted connected component.
///
/// Reach it through [`Host::instance`](crate::host::Host::instance); the
/// wrapped child is [`Host::first_child`](crate::host::Host::first_child).
pub struct ConnectedInstance<S> {
    component: String,
    node: NodeId,
    inner: ComponentTypeRef,
    store: StoreRef<S>,
    binding: Arc<Mutex<Binding<S>>>,
    subscription: Subscription,
}

impl<S: StoreState> ConnectedInstance<S> {
    /// The store resolved at construction.
    pub fn store(&self) -> StoreRef<S> {
        Arc::clone(&self.store)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Last computed state fragment.
    pub fn state_props(&self) -> Props {
        self.binding.lock().state_props().clone()
    }

    pub fn own_props(&self) -> Props {
        self.binding.lock().own_props().clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_subscribed()
    }

    pub fn subscription_phase(&self) -> SubscriptionPhase {
        self.subscription.phase()
    }
}

impl<S: StoreState> Instance for ConnectedInstance<S> {
    fn should_update(&mut self, _prev: &Props, next: &Props) -> Result<bool, ConnectError> {
        self.binding.lock().receive_own_props(next)
    }

    fn render(&mut self, _props: &Props, children: &[Element]) -> Result<Vec<Element>, ConnectError> {
        let merged = self.binding.lock().merged_props()?;
        Ok(vec![
            Element::new(Arc::clone(&self.inner), merged).with_children(children.to_vec())
        ])
    }

    fn take_update(&mut self) -> Result<bool, ConnectError> {
        self.binding.lock().take_update()
    }

    fn detach(&mut self) {
        self.binding.lock().deactivate();
        if self.subscription.dispose() {
            tracing::debug!(component = %self.component, node = %self.node, "Unsubscribed from store");
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
