use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The token does not follow the `package:module:Name` grammar.
    #[error("invalid token {token:?}: {reason}")]
    InvalidToken { token: String, reason: String },

    /// The entity kind name is not one of `resources`, `functions`, `types`.
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    /// A section value does not have the shape the document requires.
    #[error("invalid {section} section: {reason}")]
    InvalidSection {
        section: &'static str,
        reason: String,
    },
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;
