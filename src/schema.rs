//! Schema declarations and field descriptor extraction.

use crate::error::ConfigError;
use crate::resolve::env_key;
use crate::value::{TypeTag, Value};
use std::collections::HashMap;
use tracing::debug;

/// A raw, unvalidated field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Field name as written in the record (e.g. `some_int`).
    pub name: String,
    /// Declared type name (e.g. `u16`, `String`). `None` means undeclared.
    pub type_name: Option<String>,
    /// Typed default used when the variable is absent.
    pub default: Option<Value>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            default: None,
        }
    }

    /// Declaration without a type, rejected at extraction.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Ordered description of a flat configuration record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Record name, used in diagnostics only.
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.fields.push(FieldDecl::new(name, type_name));
        self
    }

    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.fields.push(FieldDecl::new(name, type_name).with_default(default));
        self
    }

    pub fn push(mut self, decl: FieldDecl) -> Self {
        self.fields.push(decl);
        self
    }
}

/// Validated metadata for one configuration field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    declared_type: TypeTag,
    default: Option<Value>,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> TypeTag {
        self.declared_type
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Environment variable consulted for this field.
    pub fn key(&self) -> String {
        env_key(&self.name)
    }
}

/// Turn a schema into one descriptor per declared field, in declaration order.
pub fn extract_fields(schema: &Schema) -> Result<Vec<FieldDescriptor>, ConfigError> {
    let mut seen_keys: HashMap<String, &str> = HashMap::with_capacity(schema.fields.len());
    let mut descriptors = Vec::with_capacity(schema.fields.len());

    for decl in &schema.fields {
        if !is_identifier(&decl.name) {
            return Err(ConfigError::schema(
                decl.name.clone(),
                "field name is not an identifier",
            ));
        }

        let type_name = decl
            .type_name
            .as_deref()
            .ok_or_else(|| ConfigError::schema(decl.name.clone(), "missing type declaration"))?;
        let declared_type = TypeTag::from_type_name(type_name).ok_or_else(|| {
            ConfigError::schema(
                decl.name.clone(),
                format!("unsupported type {}", type_name),
            )
        })?;

        if let Some(default) = &decl.default {
            if !default.fits(declared_type) {
                return Err(ConfigError::schema(
                    decl.name.clone(),
                    format!(
                        "{} default does not fit declared type {}",
                        default.kind_name(),
                        declared_type
                    ),
                ));
            }
        }

        let key = env_key(&decl.name);
        if let Some(other) = seen_keys.insert(key.clone(), &decl.name) {
            return Err(ConfigError::schema(
                decl.name.clone(),
                format!("lookup key {} already used by field {}", key, other),
            ));
        }

        descriptors.push(FieldDescriptor {
            name: decl.name.clone(),
            declared_type,
            default: decl.default.clone(),
        });
    }

    debug!(schema = %schema.name, fields = descriptors.len(), "Extracted field descriptors");

    Ok(descriptors)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
