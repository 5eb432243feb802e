use std::any::Any;

use crate::{Dep, Updater};

/// An explicit, user-triggered action.
///
/// Commands never run implicitly. The UI fills an input state, then calls
/// `ctx.dispatch::<SomeCommand>()`. A command reads everything it needs through `Dep`
/// and writes results back with `updater.set(..)`; the context applies those writes
/// before `dispatch` returns.
pub trait Command: Any + Send {
    fn run(&self, deps: Dep<'_>, updater: Updater);
}
