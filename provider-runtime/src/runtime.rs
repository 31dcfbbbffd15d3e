//! Translation of invocation events into provider calls.

use std::fmt;

use provider_config::{ExportSchema, ProviderConfig};
use provider_plugin::{ConfigCheck, Provider};
use provider_primitives::ProviderManifest;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{Instrument, debug, info_span, warn};

use crate::error::{RuntimeError, RuntimeResult};
use crate::event::{InvocationContext, ProviderEvent};

/// Adapter that dispatches invocation events to a constructed provider.
pub struct Runtime {
    provider: Box<dyn Provider>,
    manifest: ProviderManifest,
    schema: ExportSchema,
    config: ProviderConfig,
    args_schema: Value,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("manifest", &self.manifest)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    /// Creates a runtime for a provider with no configuration fields.
    #[must_use]
    pub fn new(provider: Box<dyn Provider>, manifest: ProviderManifest) -> Self {
        Self {
            provider,
            manifest,
            schema: ExportSchema::new(),
            config: ProviderConfig::default(),
            args_schema: json!({}),
        }
    }

    /// Attaches the export schema and the configuration resolved from it.
    #[must_use]
    pub fn with_config(mut self, schema: ExportSchema, config: ProviderConfig) -> Self {
        self.schema = schema;
        self.config = config;
        self
    }

    /// Attaches the JSON schema of the provider's target arguments.
    #[must_use]
    pub fn with_args_schema(mut self, args_schema: Value) -> Self {
        self.args_schema = args_schema;
        self
    }

    /// Returns the provider manifest.
    #[must_use]
    pub fn manifest(&self) -> &ProviderManifest {
        &self.manifest
    }

    /// Returns the resolved provider configuration.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns the provider's export schema.
    #[must_use]
    pub fn schema(&self) -> &ExportSchema {
        &self.schema
    }

    /// Handles a raw invocation event.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidEvent`] when the payload is not a known
    /// event and propagates provider failures unchanged.
    pub async fn handle(&self, event: Value, ctx: &InvocationContext) -> RuntimeResult<Value> {
        let span = info_span!("invocation", request_id = ctx.request_id());
        async move {
            let event: ProviderEvent = serde_json::from_value(event)
                .map_err(|source| RuntimeError::InvalidEvent { source })?;
            self.dispatch(event).await
        }
        .instrument(span)
        .await
    }

    /// Dispatches a parsed event to the provider.
    ///
    /// # Errors
    ///
    /// Propagates errors returned by the provider implementation.
    pub async fn dispatch(&self, event: ProviderEvent) -> RuntimeResult<Value> {
        debug!(event = event.kind(), "dispatching provider event");
        match event {
            ProviderEvent::Grant(request) => {
                let outcome = self.provider.grant(&request).await?;
                encode(&outcome)
            }
            ProviderEvent::Revoke(request) => {
                self.provider.revoke(&request).await?;
                Ok(json!({}))
            }
            ProviderEvent::Describe => Ok(self.describe().await),
            ProviderEvent::LoadResources(task) => {
                let outcome = self.provider.load_resources(&task).await?;
                encode(&outcome)
            }
        }
    }

    /// Describes the provider: identity, configuration schema, validation
    /// results and argument schema. Configuration values are never included.
    pub async fn describe(&self) -> Value {
        let checks = self.provider.validate_config().await;
        let healthy = checks.iter().all(ConfigCheck::success);
        if !healthy {
            let failed: Vec<_> = checks
                .iter()
                .filter(|check| !check.success())
                .map(ConfigCheck::name)
                .collect();
            warn!(provider = %self.manifest, ?failed, "provider config validation failed");
        }

        let config: Map<String, Value> = self
            .schema
            .iter()
            .map(|field| {
                let description = json!({
                    "usage": field.usage(),
                    "secret": field.is_secret(),
                    "optional": field.is_optional(),
                });
                (field.key().to_owned(), description)
            })
            .collect();

        let validation: Map<String, Value> = checks
            .iter()
            .map(|check| {
                let result = json!({ "success": check.success(), "logs": check.logs() });
                (check.name().to_owned(), result)
            })
            .collect();

        json!({
            "provider": {
                "publisher": self.manifest.publisher(),
                "name": self.manifest.name(),
                "version": self.manifest.version(),
            },
            "config": config,
            "configValidation": validation,
            "schema": { "target": self.args_schema },
            "healthy": healthy,
        })
    }
}

fn encode<T: Serialize>(value: &T) -> RuntimeResult<Value> {
    serde_json::to_value(value).map_err(|source| RuntimeError::Encode { source })
}
