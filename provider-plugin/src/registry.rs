//! Link-time registry of provider distributions.

use std::fmt;

use provider_config::{ConfigResult, ExportSchema, ProviderConfig};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::provider::{Provider, ProviderResult};

/// Factory implemented by each provider distribution.
pub trait ProviderPlugin: Sync {
    /// Declares the configuration fields the provider needs.
    ///
    /// # Errors
    ///
    /// Returns a [`provider_config::ConfigError`] when the declared schema is
    /// invalid.
    fn export_schema(&self) -> ConfigResult<ExportSchema>;

    /// JSON schema describing the target arguments the provider accepts.
    fn args_schema(&self) -> Value {
        json!({})
    }

    /// Builds the provider from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ProviderError`] when the provider cannot be set up
    /// with the supplied configuration.
    fn construct(&self, config: &ProviderConfig) -> ProviderResult<Box<dyn Provider>>;
}

/// A provider distribution linked into the current binary.
///
/// Normally produced by the [`crate::provider_plugin`] attribute.
pub struct PluginRegistration {
    name: &'static str,
    plugin: &'static dyn ProviderPlugin,
    manifest: &'static str,
}

impl PluginRegistration {
    /// Creates a registration from a plugin and its raw `manifest.json`.
    #[must_use]
    pub const fn new(
        name: &'static str,
        plugin: &'static dyn ProviderPlugin,
        manifest: &'static str,
    ) -> Self {
        Self {
            name,
            plugin,
            manifest,
        }
    }

    /// Returns the name of the registering type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the plugin factory.
    #[must_use]
    pub const fn plugin(&self) -> &'static dyn ProviderPlugin {
        self.plugin
    }

    /// Returns the embedded manifest document.
    #[must_use]
    pub const fn manifest(&self) -> &'static str {
        self.manifest
    }
}

impl fmt::Debug for PluginRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

inventory::collect!(PluginRegistration);

/// Set of provider registrations available to the runtime.
#[derive(Debug, Default, Clone)]
pub struct PluginCatalog {
    registrations: Vec<&'static PluginRegistration>,
}

impl PluginCatalog {
    /// Collects every registration linked into the binary.
    #[must_use]
    pub fn linked() -> Self {
        let catalog = Self::from_registrations(inventory::iter::<PluginRegistration>);
        debug!(count = catalog.len(), "collected linked provider registrations");
        catalog
    }

    /// Builds a catalog from an explicit list of registrations.
    #[must_use]
    pub fn from_registrations<I>(registrations: I) -> Self
    where
        I: IntoIterator<Item = &'static PluginRegistration>,
    {
        Self {
            registrations: registrations.into_iter().collect(),
        }
    }

    /// Returns the only registration in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::MissingDistribution`] when no distribution is
    /// linked and [`PluginError::MultipleDistributions`] when more than one is.
    pub fn single(&self) -> PluginResult<&'static PluginRegistration> {
        match self.registrations.as_slice() {
            [] => Err(PluginError::MissingDistribution),
            [registration] => Ok(*registration),
            many => Err(PluginError::MultipleDistributions {
                names: many.iter().map(|r| r.name()).collect(),
            }),
        }
    }

    /// Returns the number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Iterates over the registrations.
    pub fn iter(&self) -> impl Iterator<Item = &'static PluginRegistration> + '_ {
        self.registrations.iter().copied()
    }
}

/// Errors produced while locating the provider distribution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluginError {
    /// No distribution was linked into the binary.
    #[error(
        "no provider distribution was linked into this binary. Usually this means that the \
         Provider has been incorrectly packaged. Please report this issue to the provider \
         developer."
    )]
    MissingDistribution,

    /// More than one distribution was linked and the runtime cannot choose.
    #[error(
        "multiple provider distributions were linked into this binary ({names:?}). Usually \
         this means that the Provider has been incorrectly packaged. Please report this issue \
         to the provider developer."
    )]
    MultipleDistributions {
        /// Names of the registering types.
        names: Vec<&'static str>,
    },
}

impl PluginError {
    /// Returns `true` for errors caused by how the provider was packaged.
    #[must_use]
    pub const fn is_packaging_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDistribution | Self::MultipleDistributions { .. }
        )
    }
}

/// Result alias for plugin discovery.
pub type PluginResult<T> = Result<T, PluginError>;
