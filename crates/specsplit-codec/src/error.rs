use std::io;

use thiserror::Error;

/// Errors from reading or writing files in a split tree.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The requested file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),

    /// The file exists but its content could not be decoded.
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    /// The value could not be serialized.
    #[error("failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },

    /// The configured format name is not recognised.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The relative path is absolute or escapes the storage root.
    #[error("invalid relative path: {0}")]
    InvalidPath(String),

    /// Any other I/O failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl CodecError {
    /// Map an I/O error on `path`, turning `NotFound` into its own variant.
    pub fn from_io(path: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_string())
        } else {
            Self::Io {
                path: path.to_string(),
                source,
            }
        }
    }

    /// Returns `true` if this error reports a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
