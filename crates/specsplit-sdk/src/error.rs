use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("failed to encode document: {0}")]
    Encode(String),

    #[error("write error: {0}")]
    Write(#[from] specsplit_writer::WriteError),

    #[error("read error: {0}")]
    View(#[from] specsplit_view::ViewError),
}

pub type SdkResult<T> = Result<T, SdkError>;
