use std::{
    any::{TypeId, type_name},
    collections::BTreeMap,
};

use crate::{Compute, Error, State};

/// Read-only view over every registered state and compute.
///
/// Handed to `Compute::compute` and `Command::run`.
#[derive(Clone, Copy)]
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
    computes: &'a BTreeMap<TypeId, Box<dyn Compute>>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Box<dyn State>>,
        computes: &'a BTreeMap<TypeId, Box<dyn Compute>>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn try_state<T: State>(&self) -> Result<&'a T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was never added to the context. Registration happens once at
    /// startup, so a miss here is a wiring bug.
    pub fn state<T: State>(&self) -> &'a T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&'a T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was never recorded in the context.
    pub fn compute<T: Compute>(&self) -> &'a T {
        match self.try_compute::<T>() {
            Ok(compute) => compute,
            Err(err) => panic!("{err}"),
        }
    }
}
