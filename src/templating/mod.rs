//! Template context resolution and rendering.
//!
//! This module holds everything between a file's raw content and its
//! rendered text. For each file:
//!
//! 1. [`content`] drains the content into one buffer, remembering whether it
//!    arrived buffered or streamed
//! 2. [`parse`] optionally reinterprets `.json` / `.yml` / `.yaml` content as
//!    structured data
//! 3. [`context`] layers the file snapshot, options, per-file data and user
//!    data into a fresh [`RenderContext`]
//! 4. [`template`] supplies the template text (literal, computed from the
//!    context, or read once from a file)
//! 5. [`invoker`] hands template and context to the selected [`RenderEngine`]
//!
//! # Template Context
//!
//! Templates see:
//! - `file`: the file's path and ambient properties
//! - every render option (`engine`, `parse`, `variable`, `imports`, custom keys)
//! - each import as a top-level name, and each helper function as a callable
//! - every key of the file's `data` property and of the user data
//! - `contents`: the file's text, or its parsed value for structured files
//!
//! # Engines
//!
//! The default `lodash` engine uses lodash-style markers: `<%= expr %>`
//! interpolates, `<% stmt %>` holds statements and `<%# ... %>` is a comment.
//! Any other text, including `{{`, `{%` and `{#`, is output unchanged:
//!
//! ```text
//! BEFORE <%= contents %> AFTER
//! <% if file.draft %>DRAFT<% endif %>
//! <%= dirname(file.path) %>
//! ```
//!
//! `tera` and `handlebars` are also built in, and any [`RenderEngine`] can be
//! registered under a new name.

pub mod content;
pub mod context;
pub mod engine;
pub mod engines;
pub mod invoker;
pub mod options;
pub mod parse;
pub mod template;
pub mod utils;

pub use context::{CONTENTS_KEY, FILE_KEY, RenderContext};
pub use engine::{EngineError, EngineRegistry, Helper, Helpers, RenderEngine, RenderRequest};
pub use options::{DEFAULT_ENGINE, PerFile, RenderOptions};
pub use parse::StructuredFormat;
pub use template::{TemplateFn, TemplateResolver, TemplateSource};
pub use utils::deep_merge;
