//! Declarative transform configuration.
//!
//! A transform can be described in TOML instead of code:
//!
//! ```toml
//! # Either inline text...
//! template = "BEFORE <%= contents %> AFTER"
//!
//! # ...or a file, read on first use
//! # [template]
//! # src = "layouts/page.tpl"
//!
//! [data]
//! site = "docs"
//!
//! [options]
//! engine = "lodash"
//! parse = true
//! variable = "data"
//!
//! [options.imports]
//! separator = " | "
//! ```
//!
//! A relative `src` is resolved against the directory of the configuration
//! file when the configuration was loaded with [`WrapConfig::load_from`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use filewrap::config::WrapConfig;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let wrap = WrapConfig::load_from(Path::new("wrap.toml")).await?.build()?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::WrapError;
use crate::templating::{RenderOptions, TemplateSource};
use crate::wrap::{Wrap, WrapBuilder};

/// Template part of a [`WrapConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateConfig {
    /// Inline template text
    Inline(String),
    /// A template file
    File {
        /// Path of the template file
        #[serde(default)]
        src: Option<PathBuf>,
    },
}

/// A transform described as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapConfig {
    /// Template text or file
    #[serde(default)]
    pub template: Option<TemplateConfig>,

    /// Static user data
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,

    /// Static render options
    #[serde(default)]
    pub options: Option<RenderOptions>,

    /// Directory relative template paths are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl WrapConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse wrap configuration")
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid TOML syntax
    /// - The TOML structure doesn't match the expected schema
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read wrap config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse wrap config from {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        tracing::debug!("Loaded wrap config from {}", path.display());
        Ok(config)
    }

    /// The template source this configuration describes.
    ///
    /// # Errors
    ///
    /// [`WrapError::Configuration`] if there is no template, or a template
    /// table without `src`.
    pub fn template_source(&self) -> Result<TemplateSource, WrapError> {
        match &self.template {
            None => Err(WrapError::configuration("Missing template parameter")),
            Some(TemplateConfig::Inline(text)) => Ok(TemplateSource::literal(text.clone())),
            Some(TemplateConfig::File {
                src: None,
            }) => Err(WrapError::configuration("Expecting `src` option.")),
            Some(TemplateConfig::File {
                src: Some(src),
            }) => {
                let path = match &self.base_dir {
                    Some(base) if src.is_relative() => base.join(src),
                    _ => src.clone(),
                };
                Ok(TemplateSource::file(path))
            }
        }
    }

    /// A builder preloaded with this configuration.
    ///
    /// Further data/option functions or engines can be added before building.
    pub fn into_builder(self) -> Result<WrapBuilder, WrapError> {
        let template = self.template_source()?;
        let mut builder = WrapBuilder::new().template_source(template);
        if !self.data.is_empty() {
            builder = builder.data(Value::Object(self.data));
        }
        if let Some(options) = self.options {
            builder = builder.options(options);
        }
        Ok(builder)
    }

    /// Build the transform this configuration describes.
    pub fn build(self) -> Result<Wrap, WrapError> {
        self.into_builder()?.build()
    }
}
