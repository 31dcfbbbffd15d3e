//! Provider metadata bundled into every distribution.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Name of the manifest file shipped with a provider distribution.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Looks up a required key in manifest data.
///
/// # Errors
///
/// Returns [`Error::MissingManifestKey`] if the key is absent. The error is a
/// packaging defect and should be reported upstream, not retried.
pub fn load_metadata_value<'a>(
    provider_data: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Value> {
    provider_data
        .get(key)
        .ok_or_else(|| Error::MissingManifestKey {
            key: key.to_owned(),
            file: MANIFEST_FILE,
        })
}

fn load_metadata_string(provider_data: &Map<String, Value>, key: &str) -> Result<String> {
    load_metadata_value(provider_data, key)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| Error::InvalidManifestValue {
            key: key.to_owned(),
            file: MANIFEST_FILE,
        })
}

/// Identity of a packaged provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderManifest {
    publisher: String,
    name: String,
    version: String,
}

impl ProviderManifest {
    /// Creates a manifest from its three identifying fields.
    #[must_use]
    pub fn new(
        publisher: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parses the raw contents of a `manifest.json` document.
    ///
    /// Keys other than `name`, `version` and `publisher` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestParse`] when the document is not a JSON object,
    /// and the packaging errors of [`ProviderManifest::from_map`] otherwise.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let data: Map<String, Value> =
            serde_json::from_str(raw).map_err(|source| Error::ManifestParse {
                file: MANIFEST_FILE,
                source,
            })?;
        Self::from_map(&data)
    }

    /// Extracts the manifest fields from already-parsed data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingManifestKey`] or [`Error::InvalidManifestValue`]
    /// when a required field is absent or not a string.
    pub fn from_map(provider_data: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            name: load_metadata_string(provider_data, "name")?,
            version: load_metadata_string(provider_data, "version")?,
            publisher: load_metadata_string(provider_data, "publisher")?,
        })
    }

    /// Returns the provider name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the provider version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the provider publisher.
    #[must_use]
    pub fn publisher(&self) -> &str {
        &self.publisher
    }
}

impl Display for ProviderManifest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.publisher, self.name, self.version)
    }
}
