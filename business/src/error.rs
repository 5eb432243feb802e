//! Typed errors for every concern of the dashboard.
//!
//! Errors are handled where they happen: commands turn them into a [`Notice`](crate::Notice)
//! and pages render them inline. Nothing here aborts the process.

use thiserror::Error;

/// Input rejected before an action runs. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("{field} \"{value}\" is already in use")]
    Duplicate { field: &'static str, value: String },
}

impl ValidationError {
    pub fn required(field: &'static str) -> Self {
        Self::Required { field }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email and password are required")]
    MissingCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("cannot {action} {kind} {id} while it is {status}")]
    NotAllowed {
        kind: &'static str,
        id: String,
        action: &'static str,
        status: &'static str,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ModerationError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored session is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored session has version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("no location available for the session file")]
    NoLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// A page failed to render. Only that page is replaced by the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{kind} {id} does not exist")]
    MissingRecord { kind: &'static str, id: String },
    #[error("{page} failed to render: {message}")]
    Page { page: &'static str, message: String },
}

/// Every error the dashboard can surface.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Moderation(#[from] ModerationError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Auth,
    Moderation,
    Session,
    Config,
    Render,
}

impl AdminError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Moderation(ModerationError::Validation(_)) => {
                ErrorKind::Validation
            }
            Self::Auth(_) => ErrorKind::Auth,
            Self::Moderation(_) => ErrorKind::Moderation,
            Self::Session(_) => ErrorKind::Session,
            Self::Config(_) => ErrorKind::Config,
            Self::Render(_) => ErrorKind::Render,
        }
    }
}
