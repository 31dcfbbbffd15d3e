//! Configuration management for providers.
//!
//! A provider declares the fields it needs as an [`ExportSchema`]. At startup
//! each field is resolved from an environment variable whose name is the
//! PascalCase form of the field key, producing a [`ProviderConfig`].

#![warn(missing_docs, clippy::pedantic)]

mod case;
mod error;
pub mod loader;
pub mod schema;

pub use case::to_camel_case;
pub use error::{ConfigError, ConfigResult};
pub use loader::{EnvSource, ProcessEnv, ProviderConfig};
pub use schema::{ConfigField, ExportSchema};
