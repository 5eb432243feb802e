//! Explicit change subscriptions.
//!
//! Any part of the UI can ask the context to be told when a particular state or compute
//! changes. A subscription is a typed channel: the publisher side lives in `StateCtx`, the
//! receiving side is the [`Subscription`] handle. Dropping the handle (or passing it to
//! `StateCtx::unsubscribe`) ends delivery; dead senders are pruned on the next publish, so
//! nothing accumulates.

use std::any::TypeId;

use flume::{Receiver, Sender, TryRecvError};

/// Identifier handed out by `StateCtx::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// One change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub topic: TypeId,
    /// Monotonic per-topic counter, starting at 1 for the first change.
    pub generation: u64,
}

#[derive(Debug)]
pub(crate) struct Subscriber {
    pub(crate) id: SubscriptionId,
    pub(crate) send: Sender<Change>,
}

/// Receiving half of a subscription.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    topic: TypeId,
    recv: Receiver<Change>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, topic: TypeId, recv: Receiver<Change>) -> Self {
        Self { id, topic, recv }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn topic(&self) -> TypeId {
        self.topic
    }

    /// Drain pending notifications and return the newest one, if any.
    pub fn latest(&self) -> Option<Change> {
        let mut latest = None;
        loop {
            match self.recv.try_recv() {
                Ok(change) => latest = Some(change),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    /// `true` if at least one change arrived since the last poll.
    pub fn has_changed(&self) -> bool {
        self.latest().is_some()
    }
}
