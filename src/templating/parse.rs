//! Structured content detection.
//!
//! Files whose extension marks them as JSON or YAML are parsed before
//! rendering, so templates can reach into them (`contents.name`). Anything
//! else is exposed as text.

use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::core::WrapError;

/// Structured data formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredFormat {
    /// `.json`, parsed strictly
    Json,
    /// `.yml` / `.yaml`, parsed permissively
    Yaml,
}

impl StructuredFormat {
    /// Pick a format from the path's extension, case-insensitively.
    ///
    /// Records without a path, or without an extension, are not structured.
    pub fn detect(path: Option<&Path>) -> Option<Self> {
        let extension = path?.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if extension.eq_ignore_ascii_case("yml") || extension.eq_ignore_ascii_case("yaml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    fn parse(self, bytes: &[u8]) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for StructuredFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}

/// Turn normalized bytes into the value exposed as `contents`.
///
/// With `parse_enabled` off, or for unrecognized extensions, the bytes are
/// exposed as text (invalid UTF-8 is replaced). A recognized file that fails
/// to parse is an error naming the file; there is no fallback to text.
pub fn parse_contents(
    bytes: &[u8],
    path: Option<&Path>,
    parse_enabled: bool,
) -> Result<Value, WrapError> {
    let format = if parse_enabled {
        StructuredFormat::detect(path)
    } else {
        None
    };

    match format {
        Some(format) => {
            tracing::debug!("Parsing contents as {}", format);
            format.parse(bytes).map_err(|message| WrapError::structured_parse(path, format, message))
        }
        None => Ok(Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}
