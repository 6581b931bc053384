//! Construction of typed records from resolved field values.

use crate::error::ConfigError;
use crate::schema::Schema;
use crate::value::{FromValue, Value};
use serde::de::{self, DeserializeOwned, value::MapDeserializer};

/// Resolved values keyed by field name, in descriptor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFields {
    values: Vec<(String, Value)>,
}

impl ResolvedFields {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Remove a field and convert it to its Rust type.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T, ConfigError> {
        let index = self
            .values
            .iter()
            .position(|(field, _)| field == name)
            .ok_or_else(|| {
                ConfigError::Assembly(format!("no resolved value for field {}", name))
            })?;
        let (_, value) = self.values.remove(index);
        T::from_value(value)
            .map_err(|reason| ConfigError::Assembly(format!("field {}: {}", name, reason)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

}

/// A flat record that can be gathered from environment variables.
///
/// Usually implemented through [`env_config!`](crate::env_config).
pub trait EnvConfig: Sized {
    /// Field declarations for this record.
    fn schema() -> Schema;

    /// Build the record, taking every field out of `fields`.
    fn from_fields(fields: &mut ResolvedFields) -> Result<Self, ConfigError>;
}

/// Build `T` from resolved values. Every value must be consumed.
pub fn assemble<T: EnvConfig>(mut fields: ResolvedFields) -> Result<T, ConfigError> {
    let record = T::from_fields(&mut fields)?;

    if let Some((name, _)) = fields.iter().next() {
        return Err(ConfigError::Assembly(format!(
            "resolved field {} has no place in the record",
            name
        )));
    }

    Ok(record)
}

/// Build any deserializable `T` from resolved values.
pub fn assemble_deserialize<T: DeserializeOwned>(fields: ResolvedFields) -> Result<T, ConfigError> {
    let map = MapDeserializer::<_, de::value::Error>::new(fields.values.into_iter());
    T::deserialize(map).map_err(|e| ConfigError::Assembly(e.to_string()))
}

