//! Error types for reading and decoding configuration sources.

use std::path::PathBuf;

use thiserror::Error;

/// Origin label used when decoding in-memory bytes.
pub const BYTES_ORIGIN: &str = "<bytes>";

/// Failures while turning raw sources into a [`crate::Value`].
///
/// The tree is never modified when one of these is returned.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CodecError {
    /// The source file could not be read
    #[error("Failed to read '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not valid JSON
    #[error("Invalid JSON in {origin}: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The source is not valid YAML
    #[error("Invalid YAML in {origin}: {source}")]
    InvalidYaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CodecError {
    /// Check if this error came from reading a file
    pub fn is_io_error(&self) -> bool {
        matches!(self, CodecError::ReadFailed { .. })
    }

    /// Check if the source was read but could not be decoded
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            CodecError::InvalidJson { .. } | CodecError::InvalidYaml { .. }
        )
    }

    /// Check if the source file does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            CodecError::ReadFailed { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// Where the failing source came from: a file path or [`BYTES_ORIGIN`]
    pub fn origin(&self) -> String {
        match self {
            CodecError::ReadFailed { path, .. } => path.display().to_string(),
            CodecError::InvalidJson { origin, .. } | CodecError::InvalidYaml { origin, .. } => {
                origin.clone()
            }
        }
    }
}

// Conversion from CodecError to the main Error type
impl From<CodecError> for crate::Error {
    fn from(err: CodecError) -> Self {
        crate::Error::Codec(err)
    }
}
