//! Render options and per-file configuration values.
//!
//! Both the user data and the render options of a transform may be given as
//! a constant or as a function of the file being processed. [`PerFile`]
//! captures that choice and resolves it once per file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use super::engine::{EngineError, Helper, Helpers};
use crate::core::FileRecord;

/// Engine used when options do not name one.
pub const DEFAULT_ENGINE: &str = "lodash";

const fn default_parse() -> bool {
    true
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

/// Options controlling how a file is rendered.
///
/// Every option, recognized or not, is also merged into the render context,
/// so templates can read e.g. `engine` or any custom key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Identifier of the render engine in the registry
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Whether `.json`/`.yml`/`.yaml` content is parsed before rendering
    #[serde(default = "default_parse")]
    pub parse: bool,

    /// Name under which the whole context is exposed to the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,

    /// Helper values exposed to the template as top-level names
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub imports: Map<String, Value>,

    /// Helper functions callable from the template, e.g. `<%= dirname(file.path) %>`
    #[serde(skip)]
    pub helpers: Helpers,

    /// Options not recognized by the transform itself
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            parse: default_parse(),
            variable: None,
            imports: Map::new(),
            helpers: Helpers::new(),
            extra: Map::new(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    #[must_use]
    pub fn with_parse(mut self, parse: bool) -> Self {
        self.parse = parse;
        self
    }

    #[must_use]
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    #[must_use]
    pub fn with_import(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.imports.insert(name.into(), value.into());
        self
    }

    /// Expose a callable helper under `name`.
    #[must_use]
    pub fn with_helper<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, EngineError> + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Helper::new(f));
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The options as a context layer.
    pub fn to_context_layer(&self) -> Value {
        let mut layer = self.extra.clone();
        layer.insert("engine".to_string(), Value::String(self.engine.clone()));
        layer.insert("parse".to_string(), Value::Bool(self.parse));
        if let Some(variable) = &self.variable {
            layer.insert("variable".to_string(), Value::String(variable.clone()));
        }
        if !self.imports.is_empty() {
            layer.insert("imports".to_string(), Value::Object(self.imports.clone()));
        }
        Value::Object(layer)
    }
}

/// A value that is either fixed for the transform or computed for each file.
pub enum PerFile<T> {
    /// The same value for every file
    Static(T),
    /// Re-evaluated for every file
    Computed(Arc<dyn Fn(&FileRecord) -> T + Send + Sync>),
}

impl<T: Clone> PerFile<T> {
    /// Build a computed value from a closure.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&FileRecord) -> T + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// The value for `file`.
    ///
    /// Static values are cloned, so the returned value can be merged into a
    /// context without touching what the transform holds.
    pub fn resolve(&self, file: &FileRecord) -> T {
        match self {
            Self::Static(value) => value.clone(),
            Self::Computed(f) => f(file),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    /// The fixed value, when there is one.
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Self::Static(value) => Some(value),
            Self::Computed(_) => None,
        }
    }
}

impl<T: Default> Default for PerFile<T> {
    fn default() -> Self {
        Self::Static(T::default())
    }
}

impl<T: Clone> Clone for PerFile<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(value.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PerFile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
