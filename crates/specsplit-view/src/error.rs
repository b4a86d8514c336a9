use specsplit_codec::CodecError;
use specsplit_types::{EntityKind, TypeError};
use thiserror::Error;

/// Errors raised while reading a split tree.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("token error: {0}")]
    Token(#[from] TypeError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// One or more entities of a kind failed during a full read. `source`
    /// is the failure of the lowest token in sort order.
    #[error("{failures} {kind} failed to load, first: {source}")]
    Batch {
        kind: EntityKind,
        failures: usize,
        source: Box<ViewError>,
    },
}

impl ViewError {
    /// Whether the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Codec(e) => e.is_not_found(),
            Self::Batch { source, .. } => source.is_not_found(),
            Self::Token(_) => false,
        }
    }
}

pub type ViewResult<T> = Result<T, ViewError>;
