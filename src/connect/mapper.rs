//! Mapping functions that derive props from state and dispatch.
//!
//! Both mappers are tagged by shape once, when the connector is
//! configured: whether they read own props decides when they are
//! recomputed, and the dispatch mapper's form (default, function or
//! action-creator map) decides how its fragment is built.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::props::{Callback, Dispatch, PropValue, Props};
use crate::store::Action;

type StateFn<S> = dyn Fn(&S) -> anyhow::Result<Props> + Send + Sync;
type StatePropsFn<S> = dyn Fn(&S, &Props) -> anyhow::Result<Props> + Send + Sync;
type DispatchFn = dyn Fn(&Dispatch) -> anyhow::Result<Props> + Send + Sync;
type DispatchPropsFn = dyn Fn(&Dispatch, &Props) -> anyhow::Result<Props> + Send + Sync;
type MergeFn = dyn Fn(&Props, &Props, &Props) -> anyhow::Result<Props> + Send + Sync;

/// Derives a props fragment from store state.
pub enum StateMapper<S> {
    /// `(state) -> fragment`; not recomputed when own props change.
    State(Arc<StateFn<S>>),
    /// `(state, own_props) -> fragment`.
    StateAndProps(Arc<StatePropsFn<S>>),
}

impl<S> Clone for StateMapper<S> {
    fn clone(&self) -> Self {
        match self {
            StateMapper::State(f) => StateMapper::State(Arc::clone(f)),
            StateMapper::StateAndProps(f) => StateMapper::StateAndProps(Arc::clone(f)),
        }
    }
}

impl<S: 'static> StateMapper<S> {
    pub fn new(f: impl Fn(&S) -> Props + Send + Sync + 'static) -> Self {
        StateMapper::State(Arc::new(move |state| Ok(f(state))))
    }

    pub fn with_props(f: impl Fn(&S, &Props) -> Props + Send + Sync + 'static) -> Self {
        StateMapper::StateAndProps(Arc::new(move |state, own| Ok(f(state, own))))
    }

    pub fn try_new(f: impl Fn(&S) -> anyhow::Result<Props> + Send + Sync + 'static) -> Self {
        StateMapper::State(Arc::new(f))
    }

    pub fn try_with_props(
        f: impl Fn(&S, &Props) -> anyhow::Result<Props> + Send + Sync + 'static,
    ) -> Self {
        StateMapper::StateAndProps(Arc::new(f))
    }

    pub fn reads_own_props(&self) -> bool {
        matches!(self, StateMapper::StateAndProps(_))
    }

    pub fn map(&self, state: &S, own: &Props) -> anyhow::Result<Props> {
        match self {
            StateMapper::State(f) => f(state),
            StateMapper::StateAndProps(f) => f(state, own),
        }
    }
}

/// Builds an action from call arguments.
pub type ActionCreator = Arc<dyn Fn(&[Value]) -> Action + Send + Sync>;

/// Named action creators, bound to `dispatch` by key.
#[derive(Clone, Default)]
pub struct ActionCreators {
    creators: BTreeMap<String, ActionCreator>,
}

impl ActionCreators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        name: impl Into<String>,
        creator: impl Fn(&[Value]) -> Action + Send + Sync + 'static,
    ) -> Self {
        self.creators.insert(name.into(), Arc::new(creator));
        self
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

/// Wrap every creator so calling it dispatches the action it returns.
///
/// The fragment has exactly the creators' keys; each callback returns
/// whatever `dispatch` returned.
pub fn bind_action_creators(creators: &ActionCreators, dispatch: &Dispatch) -> Props {
    creators
        .creators
        .iter()
        .map(|(name, creator)| {
            let creator = Arc::clone(creator);
            let dispatch = dispatch.clone();
            let bound = Callback::new(move |args| dispatch.call(creator(args)));
            (name.clone(), PropValue::Callback(bound))
        })
        .collect()
}

/// Derives a props fragment from the store's dispatch.
#[derive(Clone, Default)]
pub enum DispatchMapper {
    /// `{ dispatch }`.
    #[default]
    Default,
    /// `(dispatch) -> fragment`; computed once per instance.
    Function(Arc<DispatchFn>),
    /// `(dispatch, own_props) -> fragment`; recomputed when own props change.
    FunctionWithProps(Arc<DispatchPropsFn>),
    /// Each creator becomes `(...args) -> dispatch(creator(...args))`.
    ActionCreators(ActionCreators),
}

impl DispatchMapper {
    pub fn function(f: impl Fn(&Dispatch) -> Props + Send + Sync + 'static) -> Self {
        DispatchMapper::Function(Arc::new(move |dispatch| Ok(f(dispatch))))
    }

    pub fn with_props(f: impl Fn(&Dispatch, &Props) -> Props + Send + Sync + 'static) -> Self {
        DispatchMapper::FunctionWithProps(Arc::new(move |dispatch, own| Ok(f(dispatch, own))))
    }

    pub fn try_function(
        f: impl Fn(&Dispatch) -> anyhow::Result<Props> + Send + Sync + 'static,
    ) -> Self {
        DispatchMapper::Function(Arc::new(f))
    }

    pub fn try_with_props(
        f: impl Fn(&Dispatch, &Props) -> anyhow::Result<Props> + Send + Sync + 'static,
    ) -> Self {
        DispatchMapper::FunctionWithProps(Arc::new(f))
    }

    pub fn reads_own_props(&self) -> bool {
        matches!(self, DispatchMapper::FunctionWithProps(_))
    }

    pub fn map(&self, dispatch: &Dispatch, own: &Props) -> anyhow::Result<Props> {
        match self {
            DispatchMapper::Default => Ok(Props::new().with("dispatch", dispatch.clone())),
            DispatchMapper::Function(f) => f(dispatch),
            DispatchMapper::FunctionWithProps(f) => f(dispatch, own),
            DispatchMapper::ActionCreators(creators) => Ok(bind_action_creators(creators, dispatch)),
        }
    }
}

impl From<ActionCreators> for DispatchMapper {
    fn from(creators: ActionCreators) -> Self {
        DispatchMapper::ActionCreators(creators)
    }
}

/// Combines `(state_props, dispatch_props, own_props)` into the props the
/// wrapped component receives.
#[derive(Clone)]
pub struct MergeProps(Arc<MergeFn>);

impl MergeProps {
    pub fn new(f: impl Fn(&Props, &Props, &Props) -> Props + Send + Sync + 'static) -> Self {
        Self(Arc::new(move |state, dispatch, own| Ok(f(state, dispatch, own))))
    }

    pub fn try_new(
        f: impl Fn(&Props, &Props, &Props) -> anyhow::Result<Props> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    pub fn merge(&self, state: &Props, dispatch: &Props, own: &Props) -> anyhow::Result<Props> {
        (self.0)(state, dispatch, own)
    }
}

/// `own ⊕ state ⊕ dispatch`, later fragments winning.
pub fn default_merge(state: &Props, dispatch: &Props, own: &Props) -> Props {
    own.overlay(state).overlay(dispatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BasicStore, StoreRef};
    use serde_json::json;

    fn recording_store() -> (StoreRef<Vec<Value>>, Dispatch) {
        let store: StoreRef<Vec<Value>> = Arc::new(BasicStore::new(Vec::new(), |mut log, action| {
            log.push(action.clone());
            log
        }));
        let dispatch = Dispatch::new(&store);
        (store, dispatch)
    }

    #[test]
    fn default_mapper_exposes_dispatch_only() {
        let (store, dispatch) = recording_store();
        let props = DispatchMapper::Default.map(&dispatch, &Props::new()).unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["dispatch"]);

        props.call("dispatch", &[json!("ping")]);
        assert_eq!(store.get_state(), vec![json!("ping")]);
    }

    #[test]
    fn action_creators_dispatch_their_result() {
        let (store, dispatch) = recording_store();
        let creators = ActionCreators::new()
            .with("add", |args| json!({"type": "add", "by": args.first().cloned()}));
        let props = bind_action_creators(&creators, &dispatch);

        assert!(!props.contains_key("dispatch"));
        let returned = props.call("add", &[json!(2)]);
        assert_eq!(returned, Some(json!({"type": "add", "by": 2})));
        assert_eq!(store.get_state(), vec![json!({"type": "add", "by": 2})]);
    }

    #[test]
    fn shape_decides_own_props_dependency() {
        let plain = StateMapper::<Value>::new(|_| Props::new());
        let with_props = StateMapper::<Value>::with_props(|_, own| own.clone());
        assert!(!plain.reads_own_props());
        assert!(with_props.reads_own_props());
        assert!(!DispatchMapper::function(|_| Props::new()).reads_own_props());
        assert!(DispatchMapper::with_props(|_, _| Props::new()).reads_own_props());
    }

    #[test]
    fn default_merge_is_right_biased() {
        let own = Props::new().with("foo", "own").with("bar", "own");
        let state = Props::new().with("foo", "state");
        let dispatch = Props::new().with("bar", "dispatch");
        let merged = default_merge(&state, &dispatch, &own);
        assert_eq!(merged.value("foo"), Some(&json!("state")));
        assert_eq!(merged.value("bar"), Some(&json!("dispatch")));
    }

    #[test]
    fn fallible_mapper_surfaces_error() {
        let mapper = StateMapper::<Value>::try_new(|_| anyhow::bail!("boom"));
        let err = mapper.map(&json!({}), &Props::new()).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
