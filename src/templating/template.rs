//! Template sources and their resolution.
//!
//! A template is either literal text, a function of the render context, or a
//! file. A file template is read at most once per [`TemplateResolver`], on the
//! first file processed, and the outcome (text or error) is cached for the
//! lifetime of the resolver.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::context::RenderContext;
use crate::core::WrapError;

/// Function computing template text from the per-file context.
pub type TemplateFn = Arc<dyn Fn(&RenderContext) -> String + Send + Sync>;

/// Where template text comes from.
#[derive(Clone)]
pub enum TemplateSource {
    /// The same text for every file
    Literal(Arc<str>),
    /// Computed for every file from its context
    Function(TemplateFn),
    /// Read from a file on first use
    File(PathBuf),
}

impl TemplateSource {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(Arc::from(text.into()))
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&RenderContext) -> String + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Reject sources that can never produce a template.
    pub(crate) fn validate(&self) -> Result<(), WrapError> {
        match self {
            Self::File(path) if path.as_os_str().is_empty() => {
                Err(WrapError::configuration("Expecting `src` option."))
            }
            _ => Ok(()),
        }
    }
}

impl From<&str> for TemplateSource {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for TemplateSource {
    fn from(text: String) -> Self {
        Self::literal(text)
    }
}

impl fmt::Debug for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// Resolves a [`TemplateSource`] to text for each file.
///
/// File templates move from unresolved to resolved exactly once. Concurrent
/// first uses wait on the same read; if a waiting task is cancelled the cell
/// stays unresolved and the next caller performs the read.
#[derive(Debug)]
pub struct TemplateResolver {
    source: TemplateSource,
    loaded: OnceCell<Result<Arc<str>, WrapError>>,
}

impl TemplateResolver {
    pub fn new(source: TemplateSource) -> Self {
        Self {
            source,
            loaded: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Whether a file template has been read (successfully or not).
    pub fn is_resolved(&self) -> bool {
        self.loaded.initialized()
    }

    /// Template text for a file whose context is `context`.
    pub async fn resolve(&self, context: &RenderContext) -> Result<Arc<str>, WrapError> {
        match &self.source {
            TemplateSource::Literal(text) => Ok(Arc::clone(text)),
            TemplateSource::Function(f) => Ok(Arc::from(f(context))),
            TemplateSource::File(path) => {
                self.loaded.get_or_init(|| load_template(path)).await.clone()
            }
        }
    }
}

async fn load_template(path: &Path) -> Result<Arc<str>, WrapError> {
    tracing::debug!("Loading template from {}", path.display());
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            tracing::debug!("Cached template from {} ({} bytes)", path.display(), text.len());
            Ok(Arc::from(text))
        }
        Err(e) => {
            tracing::warn!("Failed to load template from {}: {}", path.display(), e);
            Err(WrapError::template_load(path, e))
        }
    }
}
