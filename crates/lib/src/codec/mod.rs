//! Decoding JSON and YAML sources into [`Value`]s.
//!
//! These functions sit in front of the tree: a source is fully read and decoded
//! before anything is merged, so a malformed document never leaves a tree
//! half-loaded.
//!
//! JSON files may carry whole-line comments. Any line whose first
//! non-whitespace character is `/` or `#` is blanked before decoding:
//!
//! ```text
//! // listener settings
//! {
//!     # overridden in production
//!     "port": 8080
//! }
//! ```

mod errors;

use std::path::Path;

pub use errors::{BYTES_ORIGIN, CodecError};

use crate::Value;

/// The formats a source can be decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Picks the format from a file extension: `yaml`/`yml` are YAML, anything else JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Decodes a JSON document.
pub fn decode_json(bytes: &[u8]) -> Result<Value, CodecError> {
    decode_json_from(bytes, BYTES_ORIGIN)
}

/// Decodes a YAML document, resolving `<<` merge keys.
///
/// Keys written next to a merge key win over the merged-in ones.
pub fn decode_yaml(bytes: &[u8]) -> Result<Value, CodecError> {
    decode_yaml_from(bytes, BYTES_ORIGIN)
}

/// Reads a whole file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>, CodecError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "Failed to read file");
        CodecError::ReadFailed {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a JSON file, dropping whole-line comments, and decodes it.
pub fn decode_json_file(path: impl AsRef<Path>) -> Result<Value, CodecError> {
    let path = path.as_ref();
    let text = read_file(path)?;
    decode_json_from(&strip_comment_lines(&text), &path.display().to_string())
}

/// Reads and decodes a YAML file.
pub fn decode_yaml_file(path: impl AsRef<Path>) -> Result<Value, CodecError> {
    let path = path.as_ref();
    let text = read_file(path)?;
    decode_yaml_from(&text, &path.display().to_string())
}

/// Reads and decodes a file in the format given by its extension.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Value, CodecError> {
    match Format::from_path(&path) {
        Format::Json => decode_json_file(path),
        Format::Yaml => decode_yaml_file(path),
    }
}

fn decode_json_from(bytes: &[u8], origin: &str) -> Result<Value, CodecError> {
    let json: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|source| CodecError::InvalidJson {
            origin: origin.to_string(),
            source,
        })?;
    Ok(Value::from(json))
}

fn decode_yaml_from(bytes: &[u8], origin: &str) -> Result<Value, CodecError> {
    let invalid = |source| CodecError::InvalidYaml {
        origin: origin.to_string(),
        source,
    };
    let mut yaml: serde_yaml::Value = serde_yaml::from_slice(bytes).map_err(invalid)?;
    // Expand `<<: *anchor` merge keys into the mappings that carry them
    yaml.apply_merge().map_err(invalid)?;
    Ok(Value::from(yaml))
}

/// Blanks comment lines, keeping line breaks so decode errors report real line numbers.
fn strip_comment_lines(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for (i, line) in text.split(|&b| b == b'\n').enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        let is_comment = line
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|&b| b == b'/' || b == b'#');
        if !is_comment {
            out.extend_from_slice(line);
        }
    }
    out
}
