//! Per-field value resolution.

use crate::error::ConfigError;
use crate::schema::FieldDescriptor;
use crate::source::Source;
use crate::value::Value;
use tracing::debug;

/// Policy for fields with no variable and no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Fail with [`ConfigError::MissingVariable`].
    #[default]
    Strict,
    /// Fall back to the type's zero value.
    Lenient,
}

/// Environment variable name for a field: the name, uppercased.
pub fn env_key(field_name: &str) -> String {
    field_name.to_uppercase()
}

/// Resolve one field against `source`.
///
/// Precedence: present variable, then declared default, then the zero value
/// under [`Mode::Lenient`], otherwise a missing-variable error.
pub fn resolve<S: Source + ?Sized>(
    descriptor: &FieldDescriptor,
    mode: Mode,
    source: &S,
) -> Result<Value, ConfigError> {
    let key = env_key(descriptor.name());

    if let Some(raw) = source.get(&key) {
        debug!(key = %key, from = "env", "Resolved config field");
        return descriptor.declared_type().coerce(&key, &raw);
    }

    if let Some(default) = descriptor.default() {
        debug!(key = %key, from = "default", "Resolved config field");
        return Ok(default.clone());
    }

    match mode {
        Mode::Lenient => {
            debug!(key = %key, from = "zero", "Resolved config field");
            Ok(descriptor.declared_type().zero_value())
        }
        Mode::Strict => Err(ConfigError::MissingVariable { key }),
    }
}
