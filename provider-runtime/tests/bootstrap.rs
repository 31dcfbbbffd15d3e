use std::collections::HashMap;

use async_trait::async_trait;
use provider_config::{ConfigError, ConfigResult};
use provider_plugin::{
    AccessRequest, ConfigCheck, ConfigField, ExportSchema, GrantOutcome, LoadResourcesOutcome,
    PluginError, PluginRegistration, Provider, ProviderConfig, ProviderError, ProviderPlugin,
    ProviderResult, ResourceTask,
};
use provider_runtime::{
    BootstrapError, InvocationContext, RuntimeError, bootstrap, bootstrap_linked,
};
use serde::Deserialize;
use serde_json::json;

const MANIFEST: &str = r#"{"name":"n","version":"1","publisher":"p"}"#;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupArgs {
    group_id: String,
}

struct TokenProvider {
    token: String,
}

#[async_trait]
impl Provider for TokenProvider {
    async fn grant(&self, request: &AccessRequest) -> ProviderResult<GrantOutcome> {
        let args: GroupArgs = request.target().arguments_as()?;
        if args.group_id == "forbidden" {
            return Err(ProviderError::custom("group cannot be granted"));
        }
        Ok(GrantOutcome::default().with_access_instructions(format!(
            "{} added to {}",
            request.subject(),
            args.group_id
        )))
    }

    async fn revoke(&self, request: &AccessRequest) -> ProviderResult<()> {
        request.target().arguments_as::<GroupArgs>().map(|_| ())
    }

    async fn validate_config(&self) -> Vec<ConfigCheck> {
        if self.token.is_empty() {
            vec![ConfigCheck::failed("token", "api token is empty")]
        } else {
            vec![ConfigCheck::passed("token").with_log("token present")]
        }
    }

    async fn load_resources(&self, task: &ResourceTask) -> ProviderResult<LoadResourcesOutcome> {
        Ok(LoadResourcesOutcome::default()
            .with_resource(json!({ "type": "Group", "id": "g-1", "task": task.task() })))
    }
}

struct TokenPlugin;

impl ProviderPlugin for TokenPlugin {
    fn export_schema(&self) -> ConfigResult<ExportSchema> {
        ExportSchema::from_fields([ConfigField::new("api_token")
            .secret()
            .with_usage("API token used to call the directory")])
    }

    fn args_schema(&self) -> serde_json::Value {
        json!({ "Group": { "groupId": { "type": "string" } } })
    }

    fn construct(&self, config: &ProviderConfig) -> ProviderResult<Box<dyn Provider>> {
        let token = config.require("api_token")?.to_owned();
        Ok(Box::new(TokenProvider { token }))
    }
}

struct FailingPlugin;

impl ProviderPlugin for FailingPlugin {
    fn export_schema(&self) -> ConfigResult<ExportSchema> {
        Ok(ExportSchema::new())
    }

    fn construct(&self, _config: &ProviderConfig) -> ProviderResult<Box<dyn Provider>> {
        Err(ProviderError::custom("directory unreachable"))
    }
}

static TOKEN_PLUGIN: PluginRegistration =
    PluginRegistration::new("TokenPlugin", &TokenPlugin, MANIFEST);

fn env() -> HashMap<String, String> {
    HashMap::from([("ApiToken".to_owned(), "abc123".to_owned())])
}

fn ctx() -> InvocationContext {
    InvocationContext::new("req-test")
}

#[test]
fn bootstrap_resolves_config_and_metadata() {
    let runtime = bootstrap(&TOKEN_PLUGIN, &env()).expect("bootstrap");

    let config: Vec<_> = runtime.config().iter().collect();
    assert_eq!(config, [("api_token", Some("abc123"))]);

    let manifest = runtime.manifest();
    assert_eq!(manifest.name(), "n");
    assert_eq!(manifest.version(), "1");
    assert_eq!(manifest.publisher(), "p");
}

#[test]
fn missing_required_env_var_fails_startup() {
    let err = bootstrap(&TOKEN_PLUGIN, &HashMap::<String, String>::new())
        .expect_err("ApiToken unset");

    assert!(matches!(
        &err,
        BootstrapError::Config(ConfigError::MissingValue { env_var, .. }) if env_var == "ApiToken"
    ));
    assert!(!err.is_packaging_error());
}

#[test]
fn missing_manifest_key_is_packaging_error() {
    static NO_PUBLISHER: PluginRegistration =
        PluginRegistration::new("TokenPlugin", &TokenPlugin, r#"{"name":"n","version":"1"}"#);

    let err = bootstrap(&NO_PUBLISHER, &env()).expect_err("publisher missing");
    assert!(err.is_packaging_error());
    let message = err.to_string();
    assert!(message.contains("publisher"));
    assert!(message.contains("manifest.json"));
}

#[test]
fn malformed_manifest_propagates() {
    static BROKEN: PluginRegistration =
        PluginRegistration::new("TokenPlugin", &TokenPlugin, "{ nope");

    let err = bootstrap(&BROKEN, &env()).expect_err("malformed manifest");
    assert!(matches!(
        err,
        BootstrapError::Manifest(provider_primitives::Error::ManifestParse { .. })
    ));
}

#[test]
fn provider_construction_failure_propagates() {
    static FAILING: PluginRegistration =
        PluginRegistration::new("FailingPlugin", &FailingPlugin, MANIFEST);

    let err = bootstrap(&FAILING, &env()).expect_err("construct fails");
    assert!(matches!(err, BootstrapError::Provider(ProviderError::Custom(_))));
}

#[test]
fn no_linked_distribution_is_packaging_error() {
    let err = bootstrap_linked(&env()).expect_err("nothing linked");

    assert!(matches!(
        err,
        BootstrapError::Plugin(PluginError::MissingDistribution)
    ));
    assert!(err.is_packaging_error());
    assert!(err.to_string().contains("report this issue to the provider developer"));
}

#[tokio::test]
async fn grant_event_reaches_provider() {
    let runtime = bootstrap(&TOKEN_PLUGIN, &env()).unwrap();
    let event = json!({
        "type": "grant",
        "data": {
            "subject": "alice@example.com",
            "target": { "kind": "Group", "arguments": { "groupId": "admins" } },
            "request": { "id": "req_1" }
        }
    });

    let response = runtime.handle(event, &ctx()).await.unwrap();
    assert_eq!(
        response,
        json!({ "accessInstructions": "alice@example.com added to admins" })
    );
}

#[tokio::test]
async fn revoke_event_returns_empty_object() {
    let runtime = bootstrap(&TOKEN_PLUGIN, &env()).unwrap();
    let event = json!({
        "type": "revoke",
        "data": {
            "subject": "alice@example.com",
            "target": { "kind": "Group", "arguments": { "groupId": "admins" } },
            "request": { "id": "req_1" }
        }
    });

    assert_eq!(runtime.handle(event, &ctx()).await.unwrap(), json!({}));
}

#[tokio::test]
async fn provider_errors_propagate_unchanged() {
    let runtime = bootstrap(&TOKEN_PLUGIN, &env()).unwrap();
    let event = json!({
        "type": "grant",
        "data": {
            "subject": "alice@example.com",
            "target": { "kind": "Group", "arguments": { "groupId": "forbidden" } },
            "request": { "id": "req_2" }
        }
    });

    let err = runtime.handle(event, &ctx()).await.expect_err("forbidden group");
    assert!(matches!(err, RuntimeError::Provider(ProviderError::Custom(_))));
}

#[tokio::test]
async fn invalid_event_is_rejected() {
    let runtime = bootstrap(&TOKEN_PLUGIN, &env()).unwrap();
    let err = runtime
        .handle(json!({ "type": "grant" }), &ctx())
        .await
        .expect_err("grant without data");
    assert!(matches!(err, RuntimeError::InvalidEvent { .. }));
}

#[tokio::test]
async fn describe_reports_identity_and_schema_without_values() {
    let runtime = bootstrap(&TOKEN_PLUGIN, &env()).unwrap();
    let response = runtime
        .handle(json!({ "type": "describe" }), &ctx())
        .await
        .unwrap();

    assert_eq!(
        response["provider"],
        json!({ "publisher": "p", "name": "n", "version": "1" })
    );
    assert_eq!(
        response["config"]["api_token"],
        json!({
            "usage": "API token used to call the directory",
            "secret": true,
            "optional": false
        })
    );
    assert_eq!(response["healthy"], json!(true));
    assert_eq!(
        response["configValidation"]["token"],
        json!({ "success": true, "logs": ["token present"] })
    );
    assert_eq!(
        response["schema"]["target"]["Group"]["groupId"]["type"],
        json!("string")
    );
    assert!(!response.to_string().contains("abc123"));
}

#[tokio::test]
async fn load_resources_returns_outcome() {
    let runtime = bootstrap(&TOKEN_PLUGIN, &env()).unwrap();
    let response = runtime
        .handle(
            json!({ "type": "loadResources", "data": { "task": "listGroups" } }),
            &ctx(),
        )
        .await
        .unwrap();

    assert_eq!(
        response,
        json!({
            "resources": [{ "type": "Group", "id": "g-1", "task": "listGroups" }],
            "tasks": []
        })
    );
}
