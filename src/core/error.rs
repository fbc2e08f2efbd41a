//! Error handling for filewrap
//!
//! Every failure the transform can report is a [`WrapError`]. Construction-time
//! problems are [`WrapError::Configuration`]; everything else is scoped to the
//! single file being processed, and the offending file is dropped from the
//! pipeline while other files continue.
//!
//! # Error Categories
//!
//! - **Configuration**: [`WrapError::Configuration`] - no usable template source,
//!   or options naming an engine that is not registered
//! - **Template loading**: [`WrapError::TemplateLoad`] - an external template
//!   file could not be read
//! - **Content**: [`WrapError::StructuredParse`], [`WrapError::IncrementalRead`]
//! - **Rendering**: [`WrapError::Render`], [`WrapError::UnknownEngine`]
//!
//! I/O sources are held in an [`Arc`] so the same failure can be handed out
//! more than once. A template file that fails to load is reported identically
//! for every file processed afterwards.
//!
//! # Examples
//!
//! ```rust,no_run
//! use filewrap::core::{ErrorKind, WrapError};
//!
//! fn report(error: &WrapError) {
//!     match error.kind() {
//!         ErrorKind::StructuredParse => eprintln!("bad data file: {error}"),
//!         ErrorKind::Render => eprintln!("template failed: {error}"),
//!         _ => eprintln!("{error}"),
//!     }
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Placeholder used in messages for records that carry no path.
const UNNAMED_FILE: &str = "<unnamed file>";

/// The error type for all transform operations.
#[derive(Error, Debug, Clone)]
pub enum WrapError {
    /// The transform cannot be constructed
    ///
    /// Raised synchronously by [`WrapBuilder::build`](crate::wrap::WrapBuilder::build)
    /// before any file is processed.
    #[error("filewrap: {message}")]
    Configuration {
        /// What is wrong with the configuration
        message: String,
    },

    /// The external template file could not be read
    #[error("Failed to load template from '{path}': {source}")]
    TemplateLoad {
        /// Path of the template file
        path: String,
        /// The underlying I/O failure
        source: Arc<std::io::Error>,
    },

    /// Content recognized as structured data by its extension failed to parse
    #[error("filewrap: error parsing {path} as {format}: {message}")]
    StructuredParse {
        /// Path of the file whose content failed to parse
        path: String,
        /// The format selected from the file extension
        format: String,
        /// Message from the parser
        message: String,
    },

    /// The render engine reported a failure
    #[error("Failed to render {path} with engine '{engine}': {message}")]
    Render {
        /// Path of the file being rendered
        path: String,
        /// Identifier of the engine that failed
        engine: String,
        /// Message from the engine
        message: String,
    },

    /// Options named an engine that is not registered
    #[error("Unknown render engine '{engine}' requested for {path}")]
    UnknownEngine {
        /// Path of the file being rendered
        path: String,
        /// The unregistered engine identifier
        engine: String,
    },

    /// Consuming incrementally delivered content failed part way through
    #[error("Failed to read streamed contents of {path}: {source}")]
    IncrementalRead {
        /// Path of the file whose stream failed
        path: String,
        /// The underlying I/O failure
        source: Arc<std::io::Error>,
    },
}

/// Fieldless category of a [`WrapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    TemplateLoad,
    StructuredParse,
    Render,
    UnknownEngine,
    IncrementalRead,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::TemplateLoad => "template load",
            ErrorKind::StructuredParse => "structured parse",
            ErrorKind::Render => "render",
            ErrorKind::UnknownEngine => "unknown engine",
            ErrorKind::IncrementalRead => "incremental read",
        };
        f.write_str(name)
    }
}

impl WrapError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a template load error for `path`.
    pub fn template_load(path: &Path, source: std::io::Error) -> Self {
        Self::TemplateLoad {
            path: path.display().to_string(),
            source: Arc::new(source),
        }
    }

    /// Create a structured parse error for the file at `path`.
    pub fn structured_parse(
        path: Option<&Path>,
        format: impl fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        Self::StructuredParse {
            path: display_path(path),
            format: format.to_string(),
            message: message.into(),
        }
    }

    /// Create a render error for the file at `path`.
    pub fn render(path: Option<&Path>, engine: &str, message: impl Into<String>) -> Self {
        Self::Render {
            path: display_path(path),
            engine: engine.to_string(),
            message: message.into(),
        }
    }

    /// Create an unknown engine error for the file at `path`.
    pub fn unknown_engine(path: Option<&Path>, engine: &str) -> Self {
        Self::UnknownEngine {
            path: display_path(path),
            engine: engine.to_string(),
        }
    }

    /// Create an incremental read error for the file at `path`.
    pub fn incremental_read(path: Option<&Path>, source: std::io::Error) -> Self {
        Self::IncrementalRead {
            path: display_path(path),
            source: Arc::new(source),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration {
                ..
            } => ErrorKind::Configuration,
            Self::TemplateLoad {
                ..
            } => ErrorKind::TemplateLoad,
            Self::StructuredParse {
                ..
            } => ErrorKind::StructuredParse,
            Self::Render {
                ..
            } => ErrorKind::Render,
            Self::UnknownEngine {
                ..
            } => ErrorKind::UnknownEngine,
            Self::IncrementalRead {
                ..
            } => ErrorKind::IncrementalRead,
        }
    }

    /// The underlying I/O error, for template load and incremental read failures.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::TemplateLoad {
                source,
                ..
            }
            | Self::IncrementalRead {
                source,
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// The file path this error is about, if it is a per-file error.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Configuration {
                ..
            } => None,
            Self::TemplateLoad {
                path,
                ..
            }
            | Self::StructuredParse {
                path,
                ..
            }
            | Self::Render {
                path,
                ..
            }
            | Self::UnknownEngine {
                path,
                ..
            }
            | Self::IncrementalRead {
                path,
                ..
            } => Some(path),
        }
    }
}

/// Format an optional record path for messages and logs.
pub fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| UNNAMED_FILE.to_string(), |p| p.display().to_string())
}
