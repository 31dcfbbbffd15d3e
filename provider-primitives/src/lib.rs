//! Core shared types for provider deployment runtimes.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod manifest;

/// Error type and result alias shared across the SDK.
pub use error::{Error, Result};
/// Provider metadata bundled with every distribution.
pub use manifest::{MANIFEST_FILE, ProviderManifest, load_metadata_value};
