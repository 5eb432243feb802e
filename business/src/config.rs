use std::{any::Any, env::vars, path::PathBuf};

use anyhow::Context;
use linkup_states::{State, state_assign_impl};
use log::info;
use serde::Deserialize;

use crate::{error::ConfigError, query::PAGE_SIZES};

const DEFAULT_ADMIN_EMAIL: &str = "admin@linkup.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_NAME: &str = "Linkup Admin";
const DEFAULT_PAGE_SIZE: usize = 10;

/// Validated dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    admin_email: String,
    admin_password: String,
    admin_name: String,
    session_file: Option<PathBuf>,
    page_size: usize,
}

// Everything optional: the dashboard runs with defaults when nothing is set.
#[derive(Debug, Default, Deserialize)]
pub struct RawConfig {
    linkup_admin_email: Option<String>,
    linkup_admin_password: Option<String>,
    linkup_admin_name: Option<String>,
    linkup_session_file: Option<PathBuf>,
    linkup_page_size: Option<usize>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_owned(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_owned(),
            admin_name: DEFAULT_ADMIN_NAME.to_owned(),
            session_file: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AdminConfig {
    /// Defaults, with the session kept in memory by the caller.
    pub fn new_for_test() -> Self {
        Self::default()
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    pub fn admin_name(&self) -> &str {
        &self.admin_name
    }

    pub fn session_file(&self) -> Option<&std::path::Path> {
        self.session_file.as_deref()
    }

    /// Initial page size for every table.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Reads `LINKUP_*` environment variables.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");
        let raw: RawConfig =
            serde_env::from_iter(vars()).context("failed to read LINKUP_* variables")?;
        Ok(Self::from_raw(raw)?)
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawConfig {
            linkup_admin_email,
            linkup_admin_password,
            linkup_admin_name,
            linkup_session_file,
            linkup_page_size,
        } = raw;

        let admin_email = linkup_admin_email.unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_owned());
        if !admin_email.contains('@') {
            return Err(ConfigError::Invalid {
                var: "LINKUP_ADMIN_EMAIL",
                reason: format!("\"{admin_email}\" is not an email address"),
            });
        }

        let admin_password =
            linkup_admin_password.unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_owned());
        if admin_password.is_empty() {
            return Err(ConfigError::Invalid {
                var: "LINKUP_ADMIN_PASSWORD",
                reason: "must not be empty".to_owned(),
            });
        }

        let page_size = match linkup_page_size {
            Some(size) if PAGE_SIZES.contains(&size) => size,
            Some(size) => {
                return Err(ConfigError::Invalid {
                    var: "LINKUP_PAGE_SIZE",
                    reason: format!("{size} is not one of {PAGE_SIZES:?}"),
                });
            }
            None => DEFAULT_PAGE_SIZE,
        };

        if let Some(path) = &linkup_session_file {
            info!("Using session file {}", path.display());
        }

        Ok(Self {
            admin_email,
            admin_password,
            admin_name: linkup_admin_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_owned()),
            session_file: linkup_session_file,
            page_size,
        })
    }
}

impl State for AdminConfig {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_env::from_iter;

    #[test]
    fn empty_environment_uses_defaults() {
        let raw: RawConfig =
            from_iter(Vec::<(&str, &str)>::new()).expect("RawConfig should deserialize");
        let config = AdminConfig::from_raw(raw).expect("defaults are valid");

        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.page_size(), 10);
        assert!(config.session_file().is_none());
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let raw: RawConfig = from_iter(vec![
            ("LINKUP_ADMIN_EMAIL", "ops@linkup.com"),
            ("LINKUP_ADMIN_PASSWORD", "hunter2"),
            ("LINKUP_ADMIN_NAME", "Ops"),
            ("LINKUP_SESSION_FILE", "/tmp/linkup-session.json"),
            ("LINKUP_PAGE_SIZE", "25"),
        ])
        .expect("RawConfig should deserialize");

        let config = AdminConfig::from_raw(raw).expect("config should build");
        assert_eq!(config.admin_email(), "ops@linkup.com");
        assert_eq!(config.admin_password(), "hunter2");
        assert_eq!(config.admin_name(), "Ops");
        assert_eq!(config.page_size(), 25);
        assert_eq!(
            config.session_file(),
            Some(std::path::Path::new("/tmp/linkup-session.json"))
        );
    }

    #[test]
    fn page_size_must_be_offered() {
        let raw: RawConfig =
            from_iter(vec![("LINKUP_PAGE_SIZE", "7")]).expect("RawConfig should deserialize");

        let err = AdminConfig::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("LINKUP_PAGE_SIZE"));
    }

    #[test]
    fn admin_email_needs_an_at_sign() {
        let raw: RawConfig = from_iter(vec![("LINKUP_ADMIN_EMAIL", "admin")])
            .expect("RawConfig should deserialize");

        let err = AdminConfig::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("LINKUP_ADMIN_EMAIL"));
    }
}
