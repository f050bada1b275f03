//! Per-instance store subscription lifecycle.
//!
//! ```text
//! Unsubscribed ──subscribe──→ Subscribed ──dispose──→ Disposed
//!      │                                                 ↑
//!      └───────────────────dispose───────────────────────┘
//! ```
//!
//! `dispose` invokes the store's unsubscribe handle exactly once, and only
//! if a subscription was made. Disposing twice, or disposing an instance
//! that never subscribed, is a no-op.

use crate::store::{Listener, StoreRef, Unsubscribe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionPhase {
    Unsubscribed,
    Subscribed,
    Disposed,
}

pub struct Subscription {
    phase: SubscriptionPhase,
    unsubscribe: Option<Unsubscribe>,
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    pub fn new() -> Self {
        Self {
            phase: SubscriptionPhase::Unsubscribed,
            unsubscribe: None,
        }
    }

    pub fn phase(&self) -> SubscriptionPhase {
        self.phase
    }

    pub fn is_subscribed(&self) -> bool {
        self.phase == SubscriptionPhase::Subscribed
    }

    /// Register `listener` with `store`. Only valid from `Unsubscribed`;
    /// returns whether a subscription was made.
    pub fn subscribe<S>(&mut self, store: &StoreRef<S>, listener: Listener) -> bool {
        if self.phase != SubscriptionPhase::Unsubscribed {
            return false;
        }
        self.unsubscribe = Some(store.subscribe(listener));
        self.phase = SubscriptionPhase::Subscribed;
        true
    }

    /// Move to `Disposed`. Returns whether the unsubscribe handle ran.
    pub fn dispose(&mut self) -> bool {
        self.phase = SubscriptionPhase::Disposed;
        match self.unsubscribe.take() {
            Some(unsubscribe) => {
                unsubscribe();
                true
            }
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
