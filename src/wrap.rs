//! The wrap transform.
//!
//! A [`Wrap`] renders every file that passes through it with one template.
//! It is built once with [`WrapBuilder`], then fed records one at a time with
//! [`Wrap::process`] or as a stream with [`Wrap::process_stream`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use filewrap::core::FileRecord;
//! use filewrap::wrap::Wrap;
//!
//! # async fn example() -> Result<(), filewrap::core::WrapError> {
//! let wrap = Wrap::new("BEFORE <%= contents %> AFTER")?;
//! let file = wrap.process(FileRecord::new("hello.txt", "Hello")).await?;
//! # Ok(())
//! # }
//! ```

use futures::stream::{Stream, StreamExt};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{FileRecord, WrapError, display_path};
use crate::templating::content::{self, Normalized};
use crate::templating::{
    EngineRegistry, PerFile, RenderContext, RenderEngine, RenderOptions, TemplateResolver,
    TemplateSource, invoker, parse,
};

/// Builder for [`Wrap`].
#[derive(Debug)]
pub struct WrapBuilder {
    template: Option<TemplateSource>,
    data: PerFile<Value>,
    options: PerFile<RenderOptions>,
    engines: EngineRegistry,
}

impl Default for WrapBuilder {
    fn default() -> Self {
        Self {
            template: None,
            data: PerFile::Static(Value::Null),
            options: PerFile::default(),
            engines: EngineRegistry::builtin(),
        }
    }
}

impl WrapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use literal template text.
    #[must_use]
    pub fn template(self, text: impl Into<String>) -> Self {
        self.template_source(TemplateSource::literal(text))
    }

    /// Compute the template per file from its context.
    #[must_use]
    pub fn template_fn<F>(self, f: F) -> Self
    where
        F: Fn(&RenderContext) -> String + Send + Sync + 'static,
    {
        self.template_source(TemplateSource::function(f))
    }

    /// Read the template from a file on first use.
    #[must_use]
    pub fn template_file(self, path: impl Into<PathBuf>) -> Self {
        self.template_source(TemplateSource::file(path))
    }

    #[must_use]
    pub fn template_source(mut self, source: TemplateSource) -> Self {
        self.template = Some(source);
        self
    }

    /// Static user data, shared by every file.
    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = PerFile::Static(data);
        self
    }

    /// User data computed per file.
    #[must_use]
    pub fn data_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&FileRecord) -> Value + Send + Sync + 'static,
    {
        self.data = PerFile::computed(f);
        self
    }

    /// Static render options.
    #[must_use]
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = PerFile::Static(options);
        self
    }

    /// Render options computed per file.
    #[must_use]
    pub fn options_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&FileRecord) -> RenderOptions + Send + Sync + 'static,
    {
        self.options = PerFile::computed(f);
        self
    }

    /// Register an additional engine (or replace a built-in one).
    #[must_use]
    pub fn engine(mut self, name: impl Into<String>, engine: impl RenderEngine + 'static) -> Self {
        self.engines.register(name, engine);
        self
    }

    /// Validate the configuration and build the transform.
    ///
    /// # Errors
    ///
    /// Returns [`WrapError::Configuration`] if:
    /// - No template source was given
    /// - The template source is a file with an empty path
    /// - Static options name an engine that is not registered
    pub fn build(self) -> Result<Wrap, WrapError> {
        let template =
            self.template.ok_or_else(|| WrapError::configuration("Missing template parameter"))?;
        template.validate()?;

        if let Some(options) = self.options.as_static() {
            if !self.engines.contains(&options.engine) {
                return Err(WrapError::configuration(format!(
                    "Unknown engine '{}' (available: {})",
                    options.engine,
                    self.engines.names().join(", ")
                )));
            }
        }

        tracing::debug!("Built wrap transform with template {:?}", template);
        Ok(Wrap {
            template: TemplateResolver::new(template),
            data: self.data,
            options: self.options,
            engines: self.engines,
        })
    }
}

/// Renders file contents through a template.
///
/// A `Wrap` holds no per-file state. The only state shared between files is
/// the cached text of a file template, which is written once.
#[derive(Debug)]
pub struct Wrap {
    template: TemplateResolver,
    data: PerFile<Value>,
    options: PerFile<RenderOptions>,
    engines: EngineRegistry,
}

/// Everything a stream run produced.
#[derive(Debug, Default)]
pub struct WrapOutput {
    /// Records emitted downstream, in input order
    pub files: Vec<FileRecord>,
    /// Errors reported instead of emitting the failed records
    pub errors: Vec<WrapError>,
}

impl Wrap {
    /// A transform with literal template text and default data and options.
    pub fn new(template: impl Into<TemplateSource>) -> Result<Self, WrapError> {
        WrapBuilder::new().template_source(template.into()).build()
    }

    pub fn builder() -> WrapBuilder {
        WrapBuilder::new()
    }

    pub fn template(&self) -> &TemplateResolver {
        &self.template
    }

    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    /// Render one file.
    ///
    /// Files without content are returned untouched. Otherwise the content
    /// is replaced by the rendered text, buffered or streamed like the input.
    ///
    /// # Errors
    ///
    /// Any per-file [`WrapError`]. The record is consumed; a failed file is
    /// not handed back.
    pub async fn process(&self, mut file: FileRecord) -> Result<FileRecord, WrapError> {
        let path = file.path.clone();
        let name = display_path(path.as_deref());

        let contents = std::mem::take(&mut file.contents);
        let Some(Normalized {
            bytes,
            shape,
        }) = content::normalize(contents, path.as_deref()).await?
        else {
            tracing::debug!("Passing through {} (no contents)", name);
            return Ok(file);
        };

        let options = self.options.resolve(&file);
        let user_data = self.data.resolve(&file);

        let contents = parse::parse_contents(&bytes, path.as_deref(), options.parse)?;
        let context = RenderContext::assemble(&file, &options, user_data);
        let template = self.template.resolve(&context).await?;
        let context = context.with_contents(contents);

        let rendered = invoker::invoke(&self.engines, &template, &context, &options, path.as_deref())?;

        tracing::debug!("Wrapped {}", name);
        file.contents = shape.into_contents(rendered);
        Ok(file)
    }

    /// Render a stream of files.
    ///
    /// Up to `concurrency` files are processed at once; results are yielded
    /// in input order. A failed file yields its error in place of the record.
    pub fn process_stream<S>(
        self: Arc<Self>,
        input: S,
        concurrency: usize,
    ) -> impl Stream<Item = Result<FileRecord, WrapError>> + Send
    where
        S: Stream<Item = FileRecord> + Send + 'static,
    {
        input
            .map(move |file| {
                let wrap = Arc::clone(&self);
                async move { wrap.process(file).await }
            })
            .buffered(concurrency.max(1))
    }

    /// Drive a stream of files to completion.
    ///
    /// Rendered records and errors are collected separately; one failing file
    /// does not stop the others.
    pub async fn run<S>(self: Arc<Self>, input: S, concurrency: usize) -> WrapOutput
    where
        S: Stream<Item = FileRecord> + Send + 'static,
    {
        let mut output = WrapOutput::default();
        let mut results = std::pin::pin!(self.process_stream(input, concurrency));

        while let Some(result) = results.next().await {
            match result {
                Ok(file) => output.files.push(file),
                Err(e) => {
                    tracing::warn!("{}", e);
                    output.errors.push(e);
                }
            }
        }

        output
    }
}
