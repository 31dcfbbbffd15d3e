//! Error types for startup wiring and event handling.

use provider_config::ConfigError;
use provider_plugin::{PluginError, ProviderError};
use thiserror::Error;

/// Errors that abort process startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The provider distribution could not be located.
    #[error(transparent)]
    Plugin(#[from] PluginError),
    /// The export schema or environment configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The bundled manifest could not be read.
    #[error(transparent)]
    Manifest(#[from] provider_primitives::Error),
    /// The provider failed to construct itself.
    #[error("failed to construct provider: {0}")]
    Provider(#[from] ProviderError),
}

impl BootstrapError {
    /// Returns `true` when startup failed because of a packaging defect.
    #[must_use]
    pub const fn is_packaging_error(&self) -> bool {
        match self {
            Self::Plugin(err) => err.is_packaging_error(),
            Self::Manifest(err) => err.is_packaging_error(),
            Self::Config(_) | Self::Provider(_) => false,
        }
    }
}

/// Result alias for startup wiring.
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Errors returned from a single invocation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The event payload did not match any known event.
    #[error("invalid event: {source}")]
    InvalidEvent {
        /// Source parsing error.
        #[source]
        source: serde_json::Error,
    },
    /// The provider returned an error.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// A provider result could not be encoded as JSON.
    #[error("failed to encode response: {source}")]
    Encode {
        /// Source encoding error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for invocation handling.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
