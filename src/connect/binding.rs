//! Per-instance binding state shared with the store listener.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::host::{NodeId, RenderQueue};
use crate::props::{changed_keys, shallow_equal, Dispatch, Props};
use crate::store::{Listener, StoreRef, StoreState};

use super::factory::ConnectConfig;
use super::mapper::{default_merge, StateMapper};
use super::{ConnectError, MapperStage};

/// Cached fragments and flags for one connected instance.
///
/// Owned by its instance behind an `Arc<Mutex<_>>`; the store listener
/// only holds a weak handle, so a dropped instance leaves the listener
/// inert.
///
/// A state mapper that reads own props is not run inside the
/// notification: the own props it would see may be about to change when
/// an ancestor re-renders. The fragment is marked stale instead and
/// recomputed on the next update or when the node is popped from the
/// render queue, whichever comes first.
pub(crate) struct Binding<S> {
    component: String,
    store: StoreRef<S>,
    dispatch: Dispatch,
    config: Arc<ConnectConfig<S>>,
    own_props: Props,
    state_props: Props,
    dispatch_props: Props,
    /// Mapped state changed since the last render.
    dirty: bool,
    /// State fragment must be recomputed before the next render.
    stale: bool,
    /// In the render queue and not yet popped.
    queued: bool,
    active: bool,
    pending_error: Option<ConnectError>,
}

impl<S: StoreState> Binding<S> {
    pub(crate) fn new(
        component: String,
        store: StoreRef<S>,
        config: Arc<ConnectConfig<S>>,
        own_props: &Props,
    ) -> Result<Self, ConnectError> {
        let dispatch = Dispatch::new(&store);
        let mut binding = Self {
            component,
            store,
            dispatch,
            config,
            own_props: Props::new(),
            state_props: Props::new(),
            dispatch_props: Props::new(),
            dirty: false,
            stale: false,
            queued: false,
            active: true,
            pending_error: None,
        };
        binding.state_props = binding.compute_state_props(own_props)?;
        binding.dispatch_props = binding.compute_dispatch_props(own_props)?;
        binding.own_props = own_props.clone();
        Ok(binding)
    }

    pub(crate) fn state_props(&self) -> &Props {
        &self.state_props
    }

    pub(crate) fn own_props(&self) -> &Props {
        &self.own_props
    }

    fn state_reads_own_props(&self) -> bool {
        self.config
            .map_state
            .as_ref()
            .is_some_and(StateMapper::reads_own_props)
    }

    fn compute_state_props(&self, own: &Props) -> Result<Props, ConnectError> {
        match &self.config.map_state {
            Some(mapper) => mapper
                .map(&self.store.get_state(), own)
                .map_err(|source| ConnectError::mapper(&self.component, MapperStage::MapState, source)),
            None => Ok(Props::new()),
        }
    }

    fn compute_dispatch_props(&self, own: &Props) -> Result<Props, ConnectError> {
        self.config
            .map_dispatch
            .map(&self.dispatch, own)
            .map_err(|source| ConnectError::mapper(&self.component, MapperStage::MapDispatch, source))
    }

    /// Replace the state fragment, marking a render owed if it changed.
    fn apply_state_props(&mut self, next: Props) {
        if shallow_equal(&self.state_props, &next) {
            tracing::trace!(component = %self.component, "Store changed, mapped state unchanged");
            return;
        }
        tracing::trace!(
            component = %self.component,
            changed = ?changed_keys(&self.state_props, &next),
            "Mapped state changed"
        );
        self.state_props = next;
        self.dirty = true;
    }

    /// Recompute a stale fragment against the current own props.
    fn refresh_stale(&mut self) -> Result<(), ConnectError> {
        if !self.stale {
            return Ok(());
        }
        let next = self.compute_state_props(&self.own_props)?;
        self.stale = false;
        self.apply_state_props(next);
        Ok(())
    }

    /// Store notification. Returns whether the node needs to be queued for
    /// a render. Never renders.
    pub(crate) fn on_store_change(&mut self) -> bool {
        if !self.active {
            return false;
        }

        if self.state_reads_own_props() {
            self.stale = true;
        } else {
            match self.compute_state_props(&self.own_props) {
                Ok(next) => self.apply_state_props(next),
                Err(err) => {
                    tracing::debug!(component = %self.component, error = %err, "Mapping state failed during notification");
                    self.pending_error = Some(err);
                }
            }
            if !self.dirty && self.pending_error.is_none() {
                return false;
            }
        }

        // Already queued and not yet popped: one pass covers both changes.
        !std::mem::replace(&mut self.queued, true)
    }

    /// Parent-driven update. Returns whether the wrapped component should
    /// re-render.
    ///
    /// Fragments are computed from `next` first and committed together
    /// with it, so a failing mapper leaves the previous props in place and
    /// the same props are retried on the next update.
    pub(crate) fn receive_own_props(&mut self, next: &Props) -> Result<bool, ConnectError> {
        if shallow_equal(&self.own_props, next) {
            self.refresh_stale()?;
            if self.config.options.pure && !self.dirty {
                tracing::trace!(component = %self.component, "Own props unchanged, skipping render");
                return Ok(false);
            }
            return Ok(true);
        }

        let state_props = if self.state_reads_own_props() {
            Some(self.compute_state_props(next)?)
        } else {
            None
        };
        let dispatch_props = if self.config.map_dispatch.reads_own_props() {
            Some(self.compute_dispatch_props(next)?)
        } else {
            None
        };

        self.own_props = next.clone();
        if let Some(state_props) = state_props {
            self.state_props = state_props;
            self.stale = false;
        }
        if let Some(dispatch_props) = dispatch_props {
            self.dispatch_props = dispatch_props;
        }
        Ok(true)
    }

    /// Popped from the render queue: surface a parked mapper error, or
    /// report whether a render is still owed.
    pub(crate) fn take_update(&mut self) -> Result<bool, ConnectError> {
        self.queued = false;
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }
        self.refresh_stale()?;
        Ok(self.dirty)
    }

    /// Props for the wrapped component. Clears the dirty flag.
    pub(crate) fn merged_props(&mut self) -> Result<Props, ConnectError> {
        self.dirty = false;
        match &self.config.merge_props {
            Some(merge) => merge
                .merge(&self.state_props, &self.dispatch_props, &self.own_props)
                .map_err(|source| ConnectError::mapper(&self.component, MapperStage::MergeProps, source)),
            None => Ok(default_merge(
                &self.state_props,
                &self.dispatch_props,
                &self.own_props,
            )),
        }
    }

    /// Stop reacting to notifications that are already in flight.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
        self.dirty = false;
        self.stale = false;
        self.pending_error = None;
    }
}

/// Listener registered with the store for the instance at `node`.
pub(crate) fn store_listener<S: StoreState>(
    binding: &Arc<Mutex<Binding<S>>>,
    node: NodeId,
    queue: RenderQueue,
) -> Listener {
    let binding = Arc::downgrade(binding);
    Arc::new(move || {
        let Some(binding) = binding.upgrade() else {
            return;
        };
        let schedule = binding.lock().on_store_change();
        if schedule {
            queue.schedule(node);
        }
    })
}
