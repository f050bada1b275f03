//! FIFO of nodes awaiting a store-driven render.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::NodeId;

/// Shared queue filled by store listeners and drained by [`Host::flush`](super::Host::flush).
///
/// Listeners run in registration order, so ancestors are queued before
/// their descendants.
#[derive(Clone, Default)]
pub struct RenderQueue {
    inner: Arc<Mutex<VecDeque<NodeId>>>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self, node: NodeId) {
        self.inner.lock().push_back(node);
    }

    pub fn pop(&self) -> Option<NodeId> {
        self.inner.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
