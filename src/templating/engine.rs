//! Pluggable render engines.
//!
//! The transform never interprets template syntax itself. It hands the
//! template text and the assembled context to a [`RenderEngine`] looked up by
//! name in an [`EngineRegistry`].

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::engines::{HandlebarsEngine, LodashEngine, TeraEngine};

/// Failure reported by a render engine.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Flatten an error and its source chain into one message.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(err) = current {
            let message = err.to_string();
            if !messages.iter().any(|m| m.contains(&message)) {
                messages.push(message);
            }
            current = err.source();
        }
        Self::new(messages.join(": "))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A callable helper exposed to templates by name.
///
/// Helpers take positional arguments and return a value; every built-in
/// engine registers them with its native function mechanism.
#[derive(Clone)]
pub struct Helper(Arc<dyn Fn(&[Value]) -> Result<Value, EngineError> + Send + Sync>);

impl Helper {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, EngineError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, EngineError> {
        (self.0)(args)
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Helper(..)")
    }
}

// Helpers are opaque; two are equal only if they are the same function.
impl PartialEq for Helper {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Named helpers, in a stable order.
pub type Helpers = BTreeMap<String, Helper>;

/// Everything an engine needs for one render.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Template text
    pub template: &'a str,
    /// The assembled render context (always an object)
    pub context: &'a Value,
    /// Name under which the context should be exposed, if any
    pub variable: Option<&'a str>,
    /// Helper values exposed as top-level names
    pub imports: &'a Map<String, Value>,
    /// Helper functions callable by name
    pub helpers: &'a Helpers,
}

impl RenderRequest<'_> {
    /// The root value the template is evaluated against.
    ///
    /// Imports come first so context keys of the same name shadow them. With
    /// a named root variable the whole context sits under that one key.
    pub fn scoped_context(&self) -> Value {
        let mut root = self.imports.clone();
        match (self.variable, self.context) {
            (Some(variable), context) => {
                root.insert(variable.to_string(), context.clone());
            }
            (None, Value::Object(map)) => {
                root.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            (None, _) => {}
        }
        Value::Object(root)
    }
}

/// A render capability: template text plus context in, rendered text out.
pub trait RenderEngine: Send + Sync {
    fn render(&self, request: &RenderRequest<'_>) -> Result<String, EngineError>;
}

impl<F> RenderEngine for F
where
    F: Fn(&RenderRequest<'_>) -> Result<String, EngineError> + Send + Sync,
{
    fn render(&self, request: &RenderRequest<'_>) -> Result<String, EngineError> {
        self(request)
    }
}

/// Engines available to a transform, by identifier.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn RenderEngine>>,
}

impl EngineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in engines: `lodash`, `tera` and `handlebars`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("lodash", LodashEngine);
        registry.register("tera", TeraEngine);
        registry.register("handlebars", HandlebarsEngine);
        registry
    }

    /// Register `engine` under `name`, replacing any engine already there.
    pub fn register(&mut self, name: impl Into<String>, engine: impl RenderEngine + 'static) {
        self.engines.insert(name.into(), Arc::new(engine));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn RenderEngine>> {
        self.engines.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.engines.contains_key(name)
    }

    /// Registered identifiers, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry").field("engines", &self.names()).finish()
    }
}
