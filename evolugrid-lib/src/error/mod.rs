//! Error types

mod config;
mod transport;

pub use config::*;
pub use transport::*;

/// Errors returned by grid operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The merged descriptor is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request for a page of data failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if this is a transport error.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
