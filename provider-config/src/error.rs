//! Error types for provider configuration.

use thiserror::Error;

/// Errors emitted while resolving provider configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field had no value in the environment.
    #[error("required config `{key}` is not set; expected environment variable `{env_var}`")]
    MissingValue {
        /// Schema key of the field.
        key: String,
        /// Environment variable that was consulted.
        env_var: String,
    },
    /// The export schema declared the same key twice.
    #[error("config field `{key}` is declared more than once")]
    DuplicateField {
        /// Offending key.
        key: String,
    },
    /// A field was declared with an empty key.
    #[error("config field key cannot be empty")]
    EmptyKey,
    /// A provider asked for a key its schema does not declare.
    #[error("config `{key}` is not part of the export schema")]
    UnknownKey {
        /// Key that was requested.
        key: String,
    },
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
