//! The provider trait implemented by plugin authors.

use async_trait::async_trait;
use provider_config::ConfigError;
use thiserror::Error;

use crate::access::{AccessRequest, ConfigCheck, GrantOutcome, LoadResourcesOutcome, ResourceTask};

/// Result alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Domain logic of a provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Grants the subject access to the target.
    async fn grant(&self, request: &AccessRequest) -> ProviderResult<GrantOutcome>;

    /// Revokes access previously granted to the subject.
    async fn revoke(&self, request: &AccessRequest) -> ProviderResult<()>;

    /// Runs the provider's configuration checks.
    async fn validate_config(&self) -> Vec<ConfigCheck> {
        Vec::new()
    }

    /// Discovers resources for the given task.
    async fn load_resources(&self, task: &ResourceTask) -> ProviderResult<LoadResourcesOutcome> {
        let _ = task;
        Ok(LoadResourcesOutcome::default())
    }
}

/// Errors raised by provider implementations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Configuration could not be read during construction.
    #[error("provider configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Target arguments did not match the provider's argument type.
    #[error("invalid arguments for target `{kind}`: {reason}")]
    InvalidArguments {
        /// Target kind the arguments were supplied for.
        kind: String,
        /// Deserialization failure.
        reason: String,
    },

    /// Custom provider error with human-readable context.
    #[error("provider error: {0}")]
    Custom(String),
}

impl ProviderError {
    /// Creates a custom error from a string-like value.
    #[must_use]
    pub fn custom(reason: impl Into<String>) -> Self {
        Self::Custom(reason.into())
    }
}
