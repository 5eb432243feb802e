//! Reactive state context for the Linkup admin dashboard.
//!
//! - [`State`]: plain values written by the UI or by commands.
//! - [`Compute`]: cached values derived from states/computes, re-run only when a
//!   dependency changes.
//! - [`Command`]: explicit actions dispatched by the UI.
//! - [`Subscription`]: typed change notifications for anything registered in the context.

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod graph;
mod state;
mod state_sync_status;
mod subscription;
mod updater;

pub use command::Command;
pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use graph::{DepRoute, Graph, TopologyError};
pub use state::{State, Time, state_assign_impl};
pub use state_sync_status::StateSyncStatus;
pub use subscription::{Change, Subscription, SubscriptionId};
pub use updater::Updater;
