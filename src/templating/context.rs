//! Render context assembly.
//!
//! The context a template sees is built fresh for every file by layering the
//! available data sources. Later layers win on key collisions; nested objects
//! are merged rather than replaced.
//!
//! | Order | Layer                                    |
//! |-------|------------------------------------------|
//! | 1     | `{ file: <record snapshot> }`            |
//! | 2     | render options                           |
//! | 3     | the record's own `data` object           |
//! | 4     | user data (static or computed per file)  |
//! | 5     | `{ contents: <normalized content> }`     |
//!
//! The record's `data` object is merged beneath the user data so that an
//! explicitly configured value always wins over one carried by the file,
//! while both still override the render options.

use serde_json::{Map, Value};

use super::options::RenderOptions;
use super::utils::deep_merge;
use crate::core::FileRecord;

/// Reserved key for the file snapshot.
pub const FILE_KEY: &str = "file";

/// Reserved key for the file's (optionally parsed) content.
pub const CONTENTS_KEY: &str = "contents";

/// The per-file object handed to the template engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    root: Value,
}

impl RenderContext {
    /// Build the context for `file` from its options and user data.
    ///
    /// This produces layers 1 to 4; [`with_contents`](Self::with_contents)
    /// adds the last one. Non-object user data or `data` properties have
    /// nothing to merge and are skipped.
    pub fn assemble(file: &FileRecord, options: &RenderOptions, user_data: Value) -> Self {
        let mut root = Map::new();
        root.insert(FILE_KEY.to_string(), file.view());
        let mut root = Value::Object(root);

        deep_merge(&mut root, options.to_context_layer());

        match file.data() {
            Some(data @ Value::Object(_)) => deep_merge(&mut root, data.clone()),
            Some(Value::Null) | None => {}
            Some(other) => {
                tracing::warn!("Ignoring non-object `data` property on file: {}", other);
            }
        }

        match user_data {
            data @ Value::Object(_) => deep_merge(&mut root, data),
            Value::Null => {}
            other => tracing::warn!("Ignoring non-object template data: {}", other),
        }

        Self {
            root,
        }
    }

    /// Add the file's content under `contents`, replacing anything there.
    #[must_use]
    pub fn with_contents(mut self, contents: Value) -> Self {
        if let Value::Object(map) = &mut self.root {
            map.insert(CONTENTS_KEY.to_string(), contents);
        }
        self
    }

    /// Top-level lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Dotted-path lookup, e.g. `file.someProp`.
    pub fn lookup(&self, dotted: &str) -> Option<&Value> {
        dotted.split('.').try_fold(&self.root, |value, segment| value.get(segment))
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Log the context as indented key/value lines at trace level.
    pub fn log_trace(&self) {
        if !tracing::enabled!(tracing::Level::TRACE) {
            return;
        }
        if let Value::Object(map) = &self.root {
            for (key, value) in map {
                for line in format_value(key, value, 1) {
                    tracing::trace!("{}", line);
                }
            }
        }
    }
}

fn format_value(key: &str, value: &Value, indent: usize) -> Vec<String> {
    let prefix = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            let mut lines = vec![format!("{prefix}{key}:")];
            for (k, v) in map {
                lines.extend(format_value(k, v, indent + 1));
            }
            lines
        }
        Value::Array(items) => vec![format!("{prefix}{key}: [{} items]", items.len())],
        Value::String(s) if s.chars().count() > 100 => {
            let head: String = s.chars().take(97).collect();
            vec![format!("{prefix}{key}: \"{head}...\" ({} chars)", s.chars().count())]
        }
        other => vec![format!("{prefix}{key}: {other}")],
    }
}
