//! Integration test suite for filewrap
//!
//! End-to-end tests that build a transform through the public API and run
//! file records through it.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **scenarios**: Rendering behavior for buffered records (data, options,
//!   parsing, precedence, isolation)
//! - **streaming**: Streamed content and stream-driven pipelines
//! - **template_file**: Templates read from disk
//! - **config**: Transforms described in TOML

mod config;
mod scenarios;
mod template_file;
