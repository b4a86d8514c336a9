use specsplit_codec::CodecError;
use specsplit_types::{EntityKind, TypeError};
use thiserror::Error;

/// Errors raised while writing a split tree.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("token error: {0}")]
    Token(#[from] TypeError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Two tokens of one kind resolve to the same entity file.
    #[error("{kind} {first:?} and {second:?} both resolve to {path}")]
    PathCollision {
        kind: EntityKind,
        path: String,
        first: String,
        second: String,
    },
}

pub type WriteResult<T> = Result<T, WriteError>;
