//! Example provider distribution.
//!
//! Grants and revokes are only logged; the grant response echoes the
//! configured greeting back as access instructions.

use anyhow::Result;
use async_trait::async_trait;
use provider_config::ConfigResult;
use provider_plugin::{
    AccessRequest, ConfigCheck, ConfigField, ExportSchema, GrantOutcome, Provider,
    ProviderConfig, ProviderPlugin, ProviderResult, provider_plugin,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    provider_lambda::run().await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EchoArgs {
    channel: String,
}

#[provider_plugin]
pub struct EchoPlugin;

impl ProviderPlugin for EchoPlugin {
    fn export_schema(&self) -> ConfigResult<ExportSchema> {
        ExportSchema::from_fields([
            ConfigField::new("greeting").with_usage("text returned with every grant"),
            ConfigField::new("webhook_secret")
                .with_usage("shared secret for the audit webhook")
                .secret()
                .optional(),
        ])
    }

    fn args_schema(&self) -> Value {
        json!({
            "Channel": {
                "channel": { "type": "string", "title": "Channel" }
            }
        })
    }

    fn construct(&self, config: &ProviderConfig) -> ProviderResult<Box<dyn Provider>> {
        Ok(Box::new(EchoProvider {
            greeting: config.require("greeting")?.to_owned(),
            webhook_configured: config.get("webhook_secret").is_some(),
        }))
    }
}

struct EchoProvider {
    greeting: String,
    webhook_configured: bool,
}

#[async_trait]
impl Provider for EchoProvider {
    async fn grant(&self, request: &AccessRequest) -> ProviderResult<GrantOutcome> {
        let args: EchoArgs = request.target().arguments_as()?;
        info!(subject = request.subject(), channel = %args.channel, "echo grant");
        Ok(GrantOutcome::default().with_access_instructions(format!(
            "{}, {}: you can now post in {}",
            self.greeting,
            request.subject(),
            args.channel
        )))
    }

    async fn revoke(&self, request: &AccessRequest) -> ProviderResult<()> {
        let args: EchoArgs = request.target().arguments_as()?;
        info!(subject = request.subject(), channel = %args.channel, "echo revoke");
        Ok(())
    }

    async fn validate_config(&self) -> Vec<ConfigCheck> {
        let webhook = if self.webhook_configured {
            ConfigCheck::passed("webhook")
        } else {
            ConfigCheck::passed("webhook").with_log("audit webhook disabled")
        };
        vec![webhook]
    }
}
