//! Shared error definitions for provider primitives.

use thiserror::Error;

/// Result alias used throughout the provider runtime.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading provider packaging metadata.
#[derive(Debug, Error)]
pub enum Error {
    /// A required key was absent from the bundled manifest.
    #[error(
        "{key} was not found in the {file} file. Usually this means that the provider has been \
         incorrectly packaged. Please report this issue to the provider developer."
    )]
    MissingManifestKey {
        /// The key that was looked up.
        key: String,
        /// Name of the manifest file.
        file: &'static str,
    },

    /// A manifest key was present but did not hold a string.
    #[error(
        "{key} in the {file} file must be a string. Usually this means that the provider has \
         been incorrectly packaged. Please report this issue to the provider developer."
    )]
    InvalidManifestValue {
        /// The offending key.
        key: String,
        /// Name of the manifest file.
        file: &'static str,
    },

    /// The manifest document was not valid JSON or not a JSON object.
    #[error("failed to parse {file}: {source}")]
    ManifestParse {
        /// Name of the manifest file.
        file: &'static str,
        /// Source parsing error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Returns `true` when the error points at a defect in how the provider
    /// was packaged rather than at caller input.
    #[must_use]
    pub const fn is_packaging_error(&self) -> bool {
        matches!(
            self,
            Self::MissingManifestKey { .. } | Self::InvalidManifestValue { .. }
        )
    }
}
