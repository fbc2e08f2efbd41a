//! Test utilities for filewrap
//!
//! Helpers for writing tests against the transform: logging setup and
//! [`FileRecord`] fixtures for buffered, streamed and failing content.
//!
//! # Example
//!
//! ```rust,no_run
//! use filewrap::test_utils::{buffer_file, contents_string};
//! use filewrap::wrap::Wrap;
//!
//! # async fn example() {
//! let wrap = Wrap::new("<%= contents %>!").unwrap();
//! let file = wrap.process(buffer_file("a.txt", "hi")).await.unwrap();
//! assert_eq!(contents_string(file).await, "hi!");
//! # }
//! ```

use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::{Contents, FileRecord};
use crate::templating::content::read_to_string;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs a `tracing` subscriber once per process. Uses `level` when
/// given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=filewrap=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A record with buffered content.
pub fn buffer_file(path: &str, text: &str) -> FileRecord {
    FileRecord::new(path, text)
}

/// A record whose content arrives in the given chunks.
pub fn stream_file(path: &str, chunks: &[&str]) -> FileRecord {
    let items: Vec<io::Result<Vec<u8>>> =
        chunks.iter().map(|chunk| Ok(chunk.as_bytes().to_vec())).collect();
    FileRecord::new(path, Contents::stream(futures::stream::iter(items)))
}

/// A record whose stream yields `chunks` and then fails.
pub fn failing_stream_file(path: &str, chunks: &[&str]) -> FileRecord {
    let mut items: Vec<io::Result<Vec<u8>>> =
        chunks.iter().map(|chunk| Ok(chunk.as_bytes().to_vec())).collect();
    items.push(Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed early")));
    FileRecord::new(path, Contents::stream(futures::stream::iter(items)))
}

/// Drain a record's content into a string.
///
/// # Panics
///
/// If the content is a stream that fails.
pub async fn contents_string(file: FileRecord) -> String {
    read_to_string(file.contents).await.expect("contents should be readable")
}
