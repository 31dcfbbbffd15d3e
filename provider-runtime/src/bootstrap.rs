//! One-shot startup wiring.

use provider_config::{EnvSource, ProviderConfig};
use provider_plugin::{PluginCatalog, PluginRegistration};
use provider_primitives::ProviderManifest;
use tracing::{debug, info};

use crate::error::BootstrapResult;
use crate::runtime::Runtime;

/// Builds a [`Runtime`] from the single provider distribution linked into the
/// binary.
///
/// # Errors
///
/// Fails with a packaging error when no distribution (or more than one) is
/// linked, and otherwise as [`bootstrap`] does.
pub fn bootstrap_linked<E>(env: &E) -> BootstrapResult<Runtime>
where
    E: EnvSource + ?Sized,
{
    let catalog = PluginCatalog::linked();
    let registration = catalog.single()?;
    bootstrap(registration, env)
}

/// Builds a [`Runtime`] for a registration.
///
/// Configuration is resolved from `env` using the plugin's export schema, the
/// provider is constructed, and its identity is read from the embedded
/// manifest.
///
/// # Errors
///
/// Returns [`crate::BootstrapError`] when the schema or configuration is
/// invalid, the provider fails to construct, or the manifest is malformed or
/// missing a required key.
pub fn bootstrap<E>(registration: &PluginRegistration, env: &E) -> BootstrapResult<Runtime>
where
    E: EnvSource + ?Sized,
{
    let plugin = registration.plugin();
    debug!(plugin = registration.name(), "bootstrapping provider");

    let schema = plugin.export_schema()?;
    let config = ProviderConfig::from_env(&schema, env)?;
    let provider = plugin.construct(&config)?;
    let manifest = ProviderManifest::from_json_str(registration.manifest())?;

    info!(
        provider = %manifest,
        config_fields = schema.len(),
        "provider runtime ready"
    );

    Ok(Runtime::new(provider, manifest)
        .with_config(schema, config)
        .with_args_schema(plugin.args_schema()))
}
