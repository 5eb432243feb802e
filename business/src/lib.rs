//! Business logic of the Linkup admin dashboard.
//!
//! Every list goes through [`query`]: a filter/sort/paginate pipeline shared by all the
//! [`tables`]. Status changes live in [`moderation`], sign-in in [`auth`] and [`session`],
//! navigation in [`route`]. [`setup::admin_ctx`] wires all of it into one `StateCtx`.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod moderation;
pub mod notice;
pub mod query;
pub mod records;
pub mod route;
pub mod seed;
pub mod session;
pub mod setup;
pub mod staff;
pub mod tables;

pub use auth::{AuthCompute, AuthStatus, LoginCommand, LoginInput, LogoutCommand};
pub use config::AdminConfig;
pub use error::{AdminError, ErrorKind};
pub use notice::{Notice, NoticeLevel, Notices};
pub use route::{NavigateCommand, NavigationInput, Route, RouteState};
pub use session::{AuthUser, FileSessionStore, MemorySessionStore, SessionHandle, SessionStore};
pub use setup::{Records, admin_ctx};
