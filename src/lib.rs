//! filewrap - per-file template wrapping for build pipelines
//!
//! filewrap renders the content of each file flowing through a pipeline
//! with a template and puts the rendered text back into the file record.
//! It decides where the template comes from, what data the template sees
//! and in which precedence, and whether file content is parsed first. The
//! substitution itself is delegated to a pluggable render engine.
//!
//! # Architecture Overview
//!
//! For each [`FileRecord`](core::FileRecord):
//! - Content is collected into one buffer (streamed content is drained in order)
//! - `.json` / `.yml` / `.yaml` content is parsed unless `parse = false`
//! - A fresh render context is layered from the file, options, the file's
//!   `data` property, user data and finally `contents`
//! - The template is resolved (literal, per-file function, or a file read once)
//! - The selected engine renders; the record continues downstream with the
//!   rendered text, buffered or streamed like its input
//!
//! Files without content pass through untouched. A file that fails is
//! reported as a [`WrapError`](core::WrapError) and dropped; other files
//! are unaffected.
//!
//! # Core Modules
//!
//! - [`core`] - File records and error types
//! - [`templating`] - Content normalization, parsing, context assembly,
//!   template resolution and render engines
//! - [`wrap`] - The transform and its builder
//! - [`config`] - TOML description of a transform
//!
//! # Example
//!
//! ```rust,no_run
//! use filewrap::core::FileRecord;
//! use filewrap::templating::RenderOptions;
//! use filewrap::wrap::Wrap;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), filewrap::core::WrapError> {
//! let wrap = Wrap::builder()
//!     .template("BEFORE <%= data.contents %> <%= data.someVar %> AFTER")
//!     .data(json!({ "someVar": "someVal" }))
//!     .options(RenderOptions::default().with_variable("data"))
//!     .build()?;
//!
//! let file = wrap.process(FileRecord::new("hello.txt", "Hello")).await?;
//! // file now contains "BEFORE Hello someVal AFTER"
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod templating;
pub mod wrap;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
