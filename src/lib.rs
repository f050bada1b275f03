//! Connect-style bindings between an observable store and a component tree.
//!
//! A component declares which slice of store state and which dispatchable
//! actions it needs through [`connect`]; the resulting wrapper resolves a
//! store, subscribes to it, derives props and re-renders the wrapped
//! component only when the derived props actually change.
//!
//! # Architecture
//!
//! ```text
//! Store ──notify──→ Binding (map_state, shallow diff) ──schedule──→ RenderQueue
//!   ↑                                                                  │
//!   └──── dispatch ←── Props callbacks ←── Host::flush (render) ←──────┘
//! ```
//!
//! - [`store`]: the store contract the binding layer consumes, plus
//!   [`BasicStore`] as a reference implementation
//! - [`props`]: prop bags, callbacks and shallow comparison
//! - [`connect`]: the factory, mappers, store resolution and subscriptions
//! - [`host`]: a small rendering collaborator that mounts elements and
//!   drains deferred renders in registration order
//! - [`config`]: connect options and their TOML loading

pub mod config;
pub mod connect;
pub mod host;
pub mod logging;
pub mod props;
pub mod store;

pub use config::ConnectOptions;
pub use connect::{connect, ConnectError, ConnectedInstance, ConnectedType, Connector};
pub use host::{component_fn, Element, Host, NodeId, Provider};
pub use props::{Callback, Dispatch, PropValue, Props};
pub use store::{Action, BasicStore, Reducer, Store, StoreRef};
