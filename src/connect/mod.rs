//! Connect-binding: derive a component's props from a store.
//!
//! # Lifecycle
//!
//! ```text
//! construct ──→ resolve store ──→ map state/dispatch ──→ subscribe (if map_state)
//!                                                            │
//!     store notification ──→ recompute state fragment ──→ shallow diff ──→ queue render
//!                                                            │
//! detach ──→ unsubscribe (exactly once)
//! ```
//!
//! # Invariants
//!
//! 1. Without a state mapper no subscription is made and the state
//!    fragment stays empty.
//! 2. The wrapped component receives `own ⊕ state ⊕ dispatch` unless a
//!    custom merge function is configured.
//! 3. A notification that leaves the state fragment shallow-equal does not
//!    re-render.
//! 4. Notifications never render synchronously; renders are queued and
//!    drained by the host in registration (ancestor-first) order.
//! 5. With `pure`, a parent-driven update with shallow-equal own props
//!    skips the render.

mod binding;
mod error;
mod factory;
mod mapper;
mod resolver;
mod subscription;
mod wrapper;

pub use error::{ConnectError, MapperStage};
pub use factory::{connect, Connector};
pub use mapper::{
    bind_action_creators, default_merge, ActionCreator, ActionCreators, DispatchMapper, MergeProps,
    StateMapper,
};
pub use resolver::resolve_store;
pub use subscription::{Subscription, SubscriptionPhase};
pub use wrapper::{ConnectedInstance, ConnectedType};
