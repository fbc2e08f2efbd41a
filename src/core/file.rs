//! File records flowing through a build pipeline.
//!
//! A [`FileRecord`] is the unit of work: an optional path, a content payload
//! and an open property bag that upstream stages may decorate. The transform
//! only ever reads the path and properties and replaces the content.

use futures::stream::{BoxStream, Stream, StreamExt};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Incrementally delivered content: an ordered sequence of byte chunks.
pub type ContentStream = BoxStream<'static, std::io::Result<Vec<u8>>>;

/// Property holding the per-file data object merged into the render context.
pub const DATA_PROPERTY: &str = "data";

/// Content payload of a [`FileRecord`].
#[derive(Default)]
pub enum Contents {
    /// No content at all (directories, placeholders)
    #[default]
    Null,
    /// Fully materialized bytes
    Buffer(Vec<u8>),
    /// Bytes delivered chunk by chunk
    Stream(ContentStream),
}

impl Contents {
    /// Wrap any byte-chunk stream as streamed contents.
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = std::io::Result<Vec<u8>>> + Send + 'static,
    {
        Self::Stream(stream.boxed())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Vec<u8>> for Contents {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Buffer(bytes)
    }
}

impl From<&str> for Contents {
    fn from(text: &str) -> Self {
        Self::Buffer(text.as_bytes().to_vec())
    }
}

impl From<String> for Contents {
    fn from(text: String) -> Self {
        Self::Buffer(text.into_bytes())
    }
}

/// One logical file moving through the pipeline.
#[derive(Debug, Default)]
pub struct FileRecord {
    /// Identifying path, if the record has one
    pub path: Option<PathBuf>,
    /// Content payload
    pub contents: Contents,
    /// Ambient properties set by upstream stages, including an optional `data` object
    pub properties: Map<String, Value>,
}

impl FileRecord {
    /// Create a record with a path and contents.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Contents>) -> Self {
        Self {
            path: Some(path.into()),
            contents: contents.into(),
            properties: Map::new(),
        }
    }

    /// Create a record without a path.
    pub fn unnamed(contents: impl Into<Contents>) -> Self {
        Self {
            path: None,
            contents: contents.into(),
            properties: Map::new(),
        }
    }

    /// Set an ambient property, builder style.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Set the per-file `data` object, builder style.
    #[must_use]
    pub fn with_data(self, data: Value) -> Self {
        self.with_property(DATA_PROPERTY, data)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The per-file `data` object, if an upstream stage attached one.
    pub fn data(&self) -> Option<&Value> {
        self.properties.get(DATA_PROPERTY)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.contents.is_null()
    }

    pub fn is_buffer(&self) -> bool {
        self.contents.is_buffer()
    }

    pub fn is_stream(&self) -> bool {
        self.contents.is_stream()
    }

    /// Read-only snapshot of the record as exposed under the `file` context key.
    ///
    /// Contains every ambient property plus `path` (as a string) when the
    /// record has one. The snapshot is a fresh value; later changes to the
    /// record are not reflected in it.
    pub fn view(&self) -> Value {
        let mut view = self.properties.clone();
        if let Some(path) = &self.path {
            view.insert("path".to_string(), Value::String(path.display().to_string()));
        }
        Value::Object(view)
    }
}
