//! Error types for connected components.

use std::fmt;

use thiserror::Error;

use crate::host::NodeId;

/// Which user-supplied mapping function failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperStage {
    MapState,
    MapDispatch,
    MergeProps,
}

impl fmt::Display for MapperStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapperStage::MapState => write!(f, "map_state"),
            MapperStage::MapDispatch => write!(f, "map_dispatch"),
            MapperStage::MergeProps => write!(f, "merge_props"),
        }
    }
}

/// Errors raised while constructing, updating or rendering components.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// No store in own props and no ancestor `Provider`.
    #[error("Could not find a store for '{component}': pass one as the 'store' prop or render it inside a Provider")]
    MissingStore { component: String },

    /// A store was found but holds a different state type.
    #[error("Store available to '{component}' does not hold the requested state type")]
    StoreTypeMismatch { component: String },

    /// A mapping function returned an error.
    #[error("{stage} failed in '{component}': {source}")]
    Mapper {
        component: String,
        stage: MapperStage,
        #[source]
        source: anyhow::Error,
    },

    /// The node is not (or no longer) part of the tree.
    #[error("Node {0} is not mounted")]
    UnknownNode(NodeId),

    /// The host has no root.
    #[error("Nothing is mounted")]
    NotMounted,
}

impl ConnectError {
    pub(crate) fn mapper(component: &str, stage: MapperStage, source: anyhow::Error) -> Self {
        ConnectError::Mapper {
            component: component.to_string(),
            stage,
            source,
        }
    }
}
