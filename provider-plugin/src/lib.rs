//! Provider plugin contract.
//!
//! A provider distribution implements [`ProviderPlugin`] for a unit struct and
//! marks it with [`provider_plugin`]. The attribute embeds the distribution's
//! `manifest.json` and submits a [`PluginRegistration`] at link time, which the
//! runtime later finds through [`PluginCatalog::linked`].

#![warn(missing_docs, clippy::pedantic)]

pub mod access;
pub mod provider;
pub mod registry;

pub use access::{
    AccessRequest, ConfigCheck, GrantOutcome, LoadResourcesOutcome, RequestRef, ResourceTask,
    Target,
};
pub use provider::{Provider, ProviderError, ProviderResult};
pub use registry::{PluginCatalog, PluginError, PluginRegistration, PluginResult, ProviderPlugin};

pub use provider_config::{ConfigField, ExportSchema, ProviderConfig};
pub use provider_plugin_macros::provider_plugin;

#[doc(hidden)]
pub use inventory;
