//! The signed-in admin, persisted between runs.
//!
//! The only durable value is an [`AuthUser`], stored as versioned JSON under
//! [`SESSION_KEY`]. Anything unreadable is discarded and treated as signed out.

use std::{
    any::Any,
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use linkup_states::{State, state_assign_impl};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{config::AdminConfig, error::SessionError};

pub const SESSION_KEY: &str = "linkup_admin_user";
pub const SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub version: u32,
    pub user: AuthUser,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl PersistedSession {
    pub fn new(user: AuthUser) -> Self {
        Self {
            version: SESSION_VERSION,
            user,
        }
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The version is checked before the rest of the shape.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let VersionProbe { version } = serde_json::from_str(json)?;
        if version != SESSION_VERSION {
            return Err(SessionError::UnsupportedVersion {
                found: version,
                expected: SESSION_VERSION,
            });
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Where the session JSON lives.
pub trait SessionStore: Debug + Send + Sync {
    fn read(&self) -> Result<Option<String>, SessionError>;

    fn write(&self, json: &str) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;

    /// The stored user, if any. Unreadable sessions are logged, removed and ignored.
    fn load(&self) -> Option<AuthUser> {
        let json = match self.read() {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(err) => {
                warn!("could not read session: {err}");
                return None;
            }
        };
        match PersistedSession::from_json(&json) {
            Ok(session) => Some(session.user),
            Err(err) => {
                warn!("discarding stored session: {err}");
                if let Err(err) = self.clear() {
                    warn!("could not clear session: {err}");
                }
                None
            }
        }
    }

    fn save(&self, user: &AuthUser) -> Result<(), SessionError> {
        self.write(&PersistedSession::new(user.clone()).to_json()?)
    }
}

/// Keeps the session for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(json.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, json: &str) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(json.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}

/// One JSON file, by default `<config dir>/linkup-admin/linkup_admin_user.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<PathBuf, SessionError> {
        let dir = dirs::config_dir().ok_or(SessionError::NoLocation)?;
        Ok(dir.join("linkup-admin").join(format!("{SESSION_KEY}.json")))
    }

    /// The configured file, else the default location.
    pub fn from_config(config: &AdminConfig) -> Result<Self, SessionError> {
        let path = match config.session_file() {
            Some(path) => path.to_path_buf(),
            None => Self::default_location()?,
        };
        info!("Session file: {}", path.display());
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, json: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        debug!("session written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// The session store, registered as a state so commands can reach it.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    store: Arc<dyn SessionStore>,
}

impl SessionHandle {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }
}

impl State for SessionHandle {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
