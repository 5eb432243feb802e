use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("State not registered: {name}")]
    StateNotFound { name: &'static str },
    #[error("Compute not registered: {name}")]
    ComputeNotFound { name: &'static str },
    #[error("Command not registered: {name}")]
    CommandNotFound { name: &'static str },
}

impl Error {
    pub fn state_not_found(name: &'static str) -> Self {
        Self::StateNotFound { name }
    }

    pub fn compute_not_found(name: &'static str) -> Self {
        Self::ComputeNotFound { name }
    }

    pub fn command_not_found(name: &'static str) -> Self {
        Self::CommandNotFound { name }
    }
}
