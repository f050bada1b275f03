//! Reference rendering collaborator.
//!
//! The binding layer only needs a host that can:
//!
//! - instantiate component types with props and an ancestor [`Scope`]
//! - ask an instance whether a parent-driven update should re-render
//! - drain deferred store-driven renders from a [`RenderQueue`] in FIFO order
//! - detach instances when they leave the tree
//!
//! [`Host`] provides exactly that over an arena of nodes, with positional,
//! type-identity reconciliation of children.

mod component;
mod queue;
mod scope;
mod tree;

pub use component::{
    component_fn, same_type, ComponentType, ComponentTypeRef, Element, Instance, MountContext,
};
pub use queue::RenderQueue;
pub use scope::{Provider, Scope};
pub use tree::{Host, NodeId};
