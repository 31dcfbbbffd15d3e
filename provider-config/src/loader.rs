//! Resolution of export schemas against the environment.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::env::{self, VarError};
use std::fmt;

use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::ExportSchema;

/// Source of environment-style key/value pairs.
pub trait EnvSource {
    /// Returns the value of `name`, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        match env::var(name) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!(name, "ignoring environment variable with non-unicode value");
                None
            }
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Configuration values keyed by export-schema field.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    values: BTreeMap<String, Option<String>>,
    secrets: BTreeSet<String>,
}

impl ProviderConfig {
    /// Resolves every field of `schema` from `env`.
    ///
    /// Each field is read from the variable named by its PascalCase key.
    /// Optional fields that are unset are recorded as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] for the first required field with
    /// no value.
    pub fn from_env<E>(schema: &ExportSchema, env: &E) -> ConfigResult<Self>
    where
        E: EnvSource + ?Sized,
    {
        let mut config = Self::default();
        for field in schema {
            let env_var = field.env_var();
            let value = env.var(&env_var);
            if value.is_none() {
                if !field.is_optional() {
                    return Err(ConfigError::MissingValue {
                        key: field.key().to_owned(),
                        env_var,
                    });
                }
                debug!(key = field.key(), %env_var, "optional config not set");
            }
            if field.is_secret() {
                config.secrets.insert(field.key().to_owned());
            }
            config.values.insert(field.key().to_owned(), value);
        }
        Ok(config)
    }

    /// Returns the value for `key`, or `None` when unset or undeclared.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Option::as_deref)
    }

    /// Returns the value for a declared key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] when the key is not in the schema and
    /// [`ConfigError::MissingValue`] when it was left unset.
    pub fn require(&self, key: &str) -> ConfigResult<&str> {
        match self.values.get(key) {
            None => Err(ConfigError::UnknownKey {
                key: key.to_owned(),
            }),
            Some(None) => Err(ConfigError::MissingValue {
                key: key.to_owned(),
                env_var: crate::to_camel_case(key),
            }),
            Some(Some(value)) => Ok(value),
        }
    }

    /// Returns `true` when `key` was declared as secret.
    #[must_use]
    pub fn is_secret(&self, key: &str) -> bool {
        self.secrets.contains(key)
    }

    /// Iterates over every declared key and its value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Returns the number of declared keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the schema declared no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            match value {
                Some(_) if self.secrets.contains(key) => map.entry(key, &"<redacted>"),
                Some(value) => map.entry(key, value),
                None => map.entry(key, &None::<&str>),
            };
        }
        map.finish()
    }
}
