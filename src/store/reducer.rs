//! Reducer trait for stores.

use super::Action;

/// Marker trait for store state.
///
/// States are snapshotted on every read, so they must be cheap enough to
/// clone and safe to share between the store and its readers.
pub trait StoreState: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> StoreState for T {}

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: StoreState;

    /// Process an action and return the new state.
    fn reduce(state: Self::State, action: &Action) -> Self::State;
}
