//! Key-value sources configuration values are read from.

use crate::error::ConfigError;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Read-only string lookup, typically the process environment.
pub trait Source {
    fn get(&self, key: &str) -> Option<String>;
}

/// The live process environment, read at lookup time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                warn!(key = %key, "Environment variable is not valid unicode, treating as unset");
                None
            }
        }
    }
}

impl Source for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Variables parsed from a dotenv file.
///
/// Unlike `dotenvy::dotenv()`, loading never touches the process environment.
#[derive(Debug, Clone, Default)]
pub struct DotenvFile {
    vars: HashMap<String, String>,
}

impl DotenvFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let vars = dotenvy::from_path_iter(path)?.collect::<Result<HashMap<_, _>, _>>()?;
        debug!(path = %path.display(), vars = vars.len(), "Loaded dotenv file");
        Ok(Self { vars })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let vars = dotenvy::from_read_iter(reader).collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { vars })
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Source where this file's entries win and `fallback` fills the rest.
    pub fn layered_over<S: Source>(self, fallback: S) -> Layered<Self, S> {
        Layered {
            primary: self,
            fallback,
        }
    }
}

impl Source for DotenvFile {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Two sources consulted in order.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> Layered<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: Source, B: Source> Source for Layered<A, B> {
    fn get(&self, key: &str) -> Option<String> {
        self.primary.get(key).or_else(|| self.fallback.get(key))
    }
}
