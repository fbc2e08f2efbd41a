//! Content normalization.
//!
//! Rendering needs the whole content of a file at once. Buffered content is
//! used as-is; streamed content is drained chunk by chunk, in order, into one
//! buffer. The shape the content arrived in is remembered so the rendered
//! output can be handed back in the same shape.

use futures::StreamExt;
use std::path::Path;

use crate::core::{Contents, WrapError};

/// How a file's content was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    Buffer,
    Stream,
}

impl ContentShape {
    /// Re-encode rendered text in this shape.
    pub fn into_contents(self, text: String) -> Contents {
        let bytes = text.into_bytes();
        match self {
            ContentShape::Buffer => Contents::Buffer(bytes),
            ContentShape::Stream => {
                Contents::stream(futures::stream::iter(std::iter::once(Ok(bytes))))
            }
        }
    }
}

/// A file's complete content plus the shape it arrived in.
#[derive(Debug)]
pub struct Normalized {
    pub bytes: Vec<u8>,
    pub shape: ContentShape,
}

/// Collect `contents` into a single buffer.
///
/// Returns `Ok(None)` for [`Contents::Null`]. A failing chunk aborts the
/// whole read with [`WrapError::IncrementalRead`]; whatever was read before
/// the failure is discarded.
pub async fn normalize(
    contents: Contents,
    path: Option<&Path>,
) -> Result<Option<Normalized>, WrapError> {
    match contents {
        Contents::Null => Ok(None),
        Contents::Buffer(bytes) => {
            tracing::trace!("Using buffered contents ({} bytes)", bytes.len());
            Ok(Some(Normalized {
                bytes,
                shape: ContentShape::Buffer,
            }))
        }
        Contents::Stream(mut stream) => {
            let mut bytes = Vec::new();
            let mut chunks = 0usize;

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| WrapError::incremental_read(path, e))?;
                chunks += 1;
                bytes.extend_from_slice(&chunk);
            }

            tracing::debug!("Buffered {} streamed chunk(s) into {} bytes", chunks, bytes.len());
            Ok(Some(Normalized {
                bytes,
                shape: ContentShape::Stream,
            }))
        }
    }
}

/// Drain contents into a string, for inspecting rendered output.
///
/// Null contents yield an empty string.
pub async fn read_to_string(contents: Contents) -> Result<String, WrapError> {
    let bytes = normalize(contents, None).await?.map(|n| n.bytes).unwrap_or_default();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
