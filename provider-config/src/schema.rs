//! Export schemas declared by providers.

use std::collections::BTreeSet;

use crate::case::to_camel_case;
use crate::error::{ConfigError, ConfigResult};

/// A single configuration field a provider needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigField {
    key: String,
    usage: Option<String>,
    secret: bool,
    optional: bool,
}

impl ConfigField {
    /// Declares a required, non-secret field.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            usage: None,
            secret: false,
            optional: false,
        }
    }

    /// Sets the human-readable usage text.
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Marks the value as secret so it is redacted from debug output.
    #[must_use]
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Allows the field to be absent at startup.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Returns the `snake_case` schema key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the environment variable the field is read from.
    #[must_use]
    pub fn env_var(&self) -> String {
        to_camel_case(&self.key)
    }

    /// Returns the usage text, if any.
    #[must_use]
    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Returns `true` for secret fields.
    #[must_use]
    pub const fn is_secret(&self) -> bool {
        self.secret
    }

    /// Returns `true` for fields that may be left unset.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Ordered set of fields a provider exports for configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSchema {
    fields: Vec<ConfigField>,
}

impl ExportSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from a list of fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyKey`] or [`ConfigError::DuplicateField`] when
    /// a field key is blank or repeated.
    pub fn from_fields<I>(fields: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = ConfigField>,
    {
        fields
            .into_iter()
            .try_fold(Self::new(), ExportSchema::with_field)
    }

    /// Appends a field to the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyKey`] or [`ConfigError::DuplicateField`] when
    /// the key is blank or already declared.
    pub fn with_field(mut self, field: ConfigField) -> ConfigResult<Self> {
        if field.key.trim().is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if self.get(field.key()).is_some() {
            return Err(ConfigError::DuplicateField { key: field.key });
        }
        self.fields.push(field);
        Ok(self)
    }

    /// Returns the declared field for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Iterates over the fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigField> {
        self.fields.iter()
    }

    /// Returns the set of declared keys.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<&str> {
        self.fields.iter().map(ConfigField::key).collect()
    }

    /// Returns the number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExportSchema {
    type Item = &'a ConfigField;
    type IntoIter = std::slice::Iter<'a, ConfigField>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_schema_in_order() {
        let schema = ExportSchema::from_fields([
            ConfigField::new("api_token").secret(),
            ConfigField::new("org_id").with_usage("organisation identifier"),
            ConfigField::new("region").optional(),
        ])
        .unwrap();

        let keys: Vec<_> = schema.iter().map(ConfigField::key).collect();
        assert_eq!(keys, ["api_token", "org_id", "region"]);
        assert!(schema.get("api_token").unwrap().is_secret());
        assert!(schema.get("region").unwrap().is_optional());
        assert_eq!(
            schema.get("org_id").unwrap().usage(),
            Some("organisation identifier")
        );
    }

    #[test]
    fn field_env_var_is_pascal_case() {
        assert_eq!(ConfigField::new("api_token").env_var(), "ApiToken");
    }

    #[test]
    fn duplicate_keys_error() {
        let err = ExportSchema::from_fields([ConfigField::new("a"), ConfigField::new("a")])
            .expect_err("duplicate");
        assert_eq!(err, ConfigError::DuplicateField { key: "a".into() });
    }

    #[test]
    fn empty_key_errors() {
        let err = ExportSchema::new()
            .with_field(ConfigField::new("  "))
            .expect_err("empty key");
        assert_eq!(err, ConfigError::EmptyKey);
    }
}
