//! Core types for filewrap
//!
//! This module holds the two abstractions everything else is built on: the
//! [`FileRecord`] flowing through a build pipeline and the [`WrapError`] type
//! every per-file failure is reported with.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`WrapError`] - One variant per failure category (configuration, template
//!   loading, structured parsing, rendering, incremental reads)
//! - [`ErrorKind`] - Fieldless category for matching without destructuring
//!
//! ## `file` - Pipeline Records
//!
//! - [`FileRecord`] - Path, content payload and ambient property bag
//! - [`Contents`] - Absent, fully buffered, or incrementally delivered content

pub mod error;
pub mod file;

pub use error::{ErrorKind, WrapError, display_path};
pub use file::{ContentStream, Contents, FileRecord};
