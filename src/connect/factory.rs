//! `connect`: configure mappers once, wrap any number of components.

use std::sync::Arc;

use crate::config::ConnectOptions;
use crate::host::ComponentTypeRef;
use crate::props::{Dispatch, Props};
use crate::store::StoreState;

use super::mapper::{ActionCreators, DispatchMapper, MergeProps, StateMapper};
use super::wrapper::ConnectedType;

/// Resolved connect configuration, shared by every instance of a wrapper.
pub(crate) struct ConnectConfig<S> {
    pub(crate) map_state: Option<StateMapper<S>>,
    pub(crate) map_dispatch: DispatchMapper,
    pub(crate) merge_props: Option<MergeProps>,
    pub(crate) options: ConnectOptions,
}

impl<S> Clone for ConnectConfig<S> {
    fn clone(&self) -> Self {
        Self {
            map_state: self.map_state.clone(),
            map_dispatch: self.map_dispatch.clone(),
            merge_props: self.merge_props.clone(),
            options: self.options,
        }
    }
}

/// Builder for connected component types.
///
/// ```ignore
/// let connected = Connector::<Value>::new()
///     .map_state(|state| Props::new().with("todos", state["todos"].clone()))
///     .action_creators(ActionCreators::new().with("add", |args| json!({"type": "add", "text": args[0]})))
///     .wrap(todo_list);
/// ```
#[derive(Clone)]
pub struct Connector<S> {
    config: ConnectConfig<S>,
}

impl<S: StoreState> Default for Connector<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StoreState> Connector<S> {
    /// No state mapper, default dispatch mapping, default merge, `pure`.
    pub fn new() -> Self {
        Self {
            config: ConnectConfig {
                map_state: None,
                map_dispatch: DispatchMapper::Default,
                merge_props: None,
                options: ConnectOptions::default(),
            },
        }
    }

    pub fn map_state(self, f: impl Fn(&S) -> Props + Send + Sync + 'static) -> Self {
        self.state_mapper(StateMapper::new(f))
    }

    pub fn map_state_with_props(
        self,
        f: impl Fn(&S, &Props) -> Props + Send + Sync + 'static,
    ) -> Self {
        self.state_mapper(StateMapper::with_props(f))
    }

    pub fn state_mapper(mut self, mapper: StateMapper<S>) -> Self {
        self.config.map_state = Some(mapper);
        self
    }

    pub fn map_dispatch(self, f: impl Fn(&Dispatch) -> Props + Send + Sync + 'static) -> Self {
        self.dispatch_mapper(DispatchMapper::function(f))
    }

    pub fn map_dispatch_with_props(
        self,
        f: impl Fn(&Dispatch, &Props) -> Props + Send + Sync + 'static,
    ) -> Self {
        self.dispatch_mapper(DispatchMapper::with_props(f))
    }

    pub fn action_creators(self, creators: ActionCreators) -> Self {
        self.dispatch_mapper(DispatchMapper::ActionCreators(creators))
    }

    pub fn dispatch_mapper(mut self, mapper: DispatchMapper) -> Self {
        self.config.map_dispatch = mapper;
        self
    }

    pub fn merge_props(
        self,
        f: impl Fn(&Props, &Props, &Props) -> Props + Send + Sync + 'static,
    ) -> Self {
        self.merger(MergeProps::new(f))
    }

    pub fn merger(mut self, merge: MergeProps) -> Self {
        self.config.merge_props = Some(merge);
        self
    }

    pub fn options(mut self, options: ConnectOptions) -> Self {
        self.config.options = options;
        self
    }

    pub fn pure(mut self, pure: bool) -> Self {
        self.config.options.pure = pure;
        self
    }

    /// Wrap `inner`. Every call returns a new component type named
    /// `Connect(<inner>)`.
    pub fn wrap(&self, inner: ComponentTypeRef) -> Arc<ConnectedType<S>> {
        Arc::new(ConnectedType::new(inner, Arc::new(self.config.clone())))
    }
}

/// Positional form of [`Connector`]: every argument is optional.
pub fn connect<S: StoreState>(
    map_state: Option<StateMapper<S>>,
    map_dispatch: Option<DispatchMapper>,
    merge_props: Option<MergeProps>,
    options: Option<ConnectOptions>,
) -> Connector<S> {
    Connector {
        config: ConnectConfig {
            map_state,
            map_dispatch: map_dispatch.unwrap_or_default(),
            merge_props,
            options: options.unwrap_or_default(),
        },
    }
}
