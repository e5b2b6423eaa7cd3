//!
//! cfgtree: a thread-safe hierarchical key-value store for process configuration.
//!
//! ## Core Concepts
//!
//! * **Trees (`tree::Tree`)**: Handles onto a shared graph of nodes addressed by case-insensitive dot-paths such as `server.http.port`. One lock guards a whole tree.
//! * **Values (`value::Value`)**: The closed set of decoded values a node can hold: scalars, generic lists and maps, and homogeneous scalar lists.
//! * **Loading (`Tree::load_data`)**: Recursively merges a decoded value into the tree, either replacing existing values or only filling in unset ones.
//! * **Codecs (`codec`)**: Turn JSON and YAML bytes or files into values before they reach a tree.
//! * **Logging (`logging`)**: Installs the process-wide `tracing` subscriber from settings held in a tree.
//!
//! ```
//! use cfgtree::Tree;
//!
//! let config = Tree::new();
//! config.load_json("", br#"{"server": {"port": 8080}}"#, false)?;
//! config.load_yaml("", b"server:\n  port: 9090\n  host: example.com\n", false)?;
//!
//! assert_eq!(config.int("server.port"), Some(8080)); // kept, not replaced
//! assert_eq!(config.string("server.host").as_deref(), Some("example.com"));
//! # Ok::<(), cfgtree::Error>(())
//! ```

pub mod codec;
pub mod logging;
pub mod tree;
pub mod util;
pub mod value;

/// Re-export the `Tree` struct for easier access.
pub use tree::Tree;
pub use value::Value;

/// Result type used throughout the cfgtree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the cfgtree library.
///
/// Tree operations themselves never fail; errors come from the collaborators
/// around them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured read/decode errors from the codec module
    #[error(transparent)]
    Codec(codec::CodecError),

    /// Structured errors from the helper utilities
    #[error(transparent)]
    Util(util::UtilError),

    /// Structured logger bootstrap errors
    #[error(transparent)]
    Log(logging::LogError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Codec(_) => "codec",
            Error::Util(_) => "util",
            Error::Log(_) => "logging",
        }
    }

    /// Check if this error indicates a source file was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_io_error(),
            Error::Log(logging::LogError::OpenFailed { .. }) => true,
            _ => false,
        }
    }

    /// Check if this error is a malformed JSON or YAML document.
    pub fn is_decode_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_decode_error(),
            _ => false,
        }
    }
}
