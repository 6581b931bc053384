//! Configuration error types.

use crate::value::TypeTag;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Underlying numeric parse failure behind a coercion error.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

/// Configuration gathering error.
///
/// Raw variable values are never part of the message.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid schema: field {field:?}: {reason}")]
    Schema { field: String, reason: String },
    #[error("missing environment variable: {key}")]
    MissingVariable { key: String },
    #[error("environment variable {key} is not a valid {expected}: {source}")]
    Coercion {
        key: String,
        expected: TypeTag,
        #[source]
        source: ParseError,
    },
    #[error("failed to assemble config: {0}")]
    Assembly(String),
    #[error("failed to load dotenv file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl ConfigError {
    pub(crate) fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Schema {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Lookup key of the variable behind a missing or coercion failure.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::MissingVariable { key } | ConfigError::Coercion { key, .. } => Some(key),
            _ => None,
        }
    }
}
