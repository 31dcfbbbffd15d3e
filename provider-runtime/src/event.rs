//! Invocation events and their context.

use provider_plugin::{AccessRequest, ResourceTask};
use serde::Deserialize;

/// Event delivered to the runtime by the hosting platform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ProviderEvent {
    /// Grant the subject access to a target.
    Grant(AccessRequest),
    /// Revoke the subject's access to a target.
    Revoke(AccessRequest),
    /// Report provider identity, configuration schema and health.
    Describe,
    /// Run a resource discovery task.
    LoadResources(ResourceTask),
}

impl ProviderEvent {
    /// Short name of the event used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Grant(_) => "grant",
            Self::Revoke(_) => "revoke",
            Self::Describe => "describe",
            Self::LoadResources(_) => "loadResources",
        }
    }
}

/// Platform metadata for a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    request_id: String,
    function_arn: Option<String>,
    deadline_ms: Option<u64>,
}

impl InvocationContext {
    /// Creates a context for the given platform request id.
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            function_arn: None,
            deadline_ms: None,
        }
    }

    /// Sets the invoked function ARN.
    #[must_use]
    pub fn with_function_arn(mut self, arn: impl Into<String>) -> Self {
        self.function_arn = Some(arn.into());
        self
    }

    /// Sets the invocation deadline in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    /// Returns the platform request id.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the invoked function ARN.
    #[must_use]
    pub fn function_arn(&self) -> Option<&str> {
        self.function_arn.as_deref()
    }

    /// Returns the invocation deadline in epoch milliseconds.
    #[must_use]
    pub const fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }
}
