use std::{
    any::{Any, TypeId, type_name},
    fmt,
};

use flume::Sender;
use log::warn;

pub(crate) type Update = (TypeId, Box<dyn Any + Send>);

/// Write handle given to computes and commands.
///
/// Values are queued on a channel and applied by `StateCtx::sync_computes`, so a
/// command never observes its own writes mid-run.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    /// Queue `value` as the new content of the state or compute of type `T`.
    pub fn set<T: Any + Send>(&self, value: T) {
        if self
            .send
            .send((TypeId::of::<T>(), Box::new(value)))
            .is_err()
        {
            warn!("update for {} dropped: context is gone", type_name::<T>());
        }
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("queued", &self.send.len())
            .finish()
    }
}
