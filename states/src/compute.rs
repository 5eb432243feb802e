use std::any::{Any, TypeId, type_name};

use log::warn;

use crate::{Dep, State, Updater};

/// The states and computes a [`Compute`] reads.
///
/// A compute is re-run whenever any of these change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeDeps {
    pub states: Vec<TypeId>,
    pub computes: Vec<TypeId>,
}

impl ComputeDeps {
    /// A compute that is only ever written by commands.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn state<T: State>(mut self) -> Self {
        self.states.push(TypeId::of::<T>());
        self
    }

    pub fn compute<T: Compute>(mut self) -> Self {
        self.computes.push(TypeId::of::<T>());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.states.iter().chain(self.computes.iter()).copied()
    }
}

/// A cached value derived from other states and computes.
///
/// `compute` must be pure: it reads through `Dep` and publishes its new value with
/// `updater.set(..)`. The context applies the value during the next sync.
pub trait Compute: Any + Send {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for computes.
pub fn assign_impl<T: Compute>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *this = *value,
        Err(_) => warn!("compute assign ignored: payload is not a {}", type_name::<T>()),
    }
}
