//! Typed, immutable configuration records gathered from environment variables.
//!
//! A record is described by a [`Schema`]: field names, declared primitive
//! types and optional defaults. Each field is looked up under its uppercased
//! name, coerced to its declared type and bound into the record.
//!
//! Missing variables resolve, in order, to the declared default, to the
//! type's zero value under [`Mode::Lenient`], or to
//! [`ConfigError::MissingVariable`] under [`Mode::Strict`].
//!
//! ```
//! use env_record::{Mode, env_config, gather_config_with};
//! use std::collections::HashMap;
//!
//! env_config! {
//!     #[derive(Debug)]
//!     pub struct AppConfig {
//!         pub some_string: String,
//!         pub some_int: i64,
//!         pub flag: bool,
//!     }
//! }
//!
//! let env: HashMap<String, String> = [("SOME_STRING", "hi"), ("SOME_INT", "666"), ("FLAG", "True")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//!
//! let config: AppConfig = gather_config_with(Mode::Strict, &env).unwrap();
//! assert_eq!(config.some_int, 666);
//! assert!(config.flag);
//! ```

mod assemble;
mod error;
mod macros;
mod resolve;
mod schema;
mod source;
mod value;

pub use assemble::{EnvConfig, ResolvedFields, assemble, assemble_deserialize};
pub use error::{ConfigError, ParseError};
pub use resolve::{Mode, env_key, resolve};
pub use schema::{FieldDecl, FieldDescriptor, Schema, extract_fields};
pub use source::{DotenvFile, Layered, ProcessEnv, Source};
pub use value::{FromValue, IntKind, TypeTag, Value, ValueDeserializer, parse_flag};

use serde::de::DeserializeOwned;

/// Gather `T` from the live process environment.
pub fn gather_config<T: EnvConfig>(mode: Mode) -> Result<T, ConfigError> {
    gather_config_with(mode, &ProcessEnv)
}

/// Gather `T` from an injected source.
///
/// Stops at the first field that cannot be resolved.
pub fn gather_config_with<T, S>(mode: Mode, source: &S) -> Result<T, ConfigError>
where
    T: EnvConfig,
    S: Source + ?Sized,
{
    let fields = gather_config_from_env(&T::schema(), mode, source)?;
    assemble(fields)
}

/// Resolve every field of `schema` without building a record.
pub fn gather_config_from_env<S: Source + ?Sized>(
    schema: &Schema,
    mode: Mode,
    source: &S,
) -> Result<ResolvedFields, ConfigError> {
    let descriptors = extract_fields(schema)?;

    let mut fields = ResolvedFields::with_capacity(descriptors.len());
    for descriptor in &descriptors {
        let value = resolve(descriptor, mode, source)?;
        fields.insert(descriptor.name(), value);
    }

    Ok(fields)
}

/// Resolve `schema` and deserialize the result into `T`.
pub fn gather_config_into<T, S>(schema: &Schema, mode: Mode, source: &S) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    S: Source + ?Sized,
{
    let fields = gather_config_from_env(schema, mode, source)?;
    assemble_deserialize(fields)
}
