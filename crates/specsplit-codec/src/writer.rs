use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::format::{CodecConfig, Format};
use crate::source::validate_relative;
use crate::SIDECAR_EXTENSION;

/// Writes files of a split tree under a root directory.
#[derive(Clone, Debug)]
pub struct SpecWriter {
    root: PathBuf,
    config: CodecConfig,
}

impl SpecWriter {
    pub fn new(root: impl Into<PathBuf>, config: CodecConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn format(&self) -> Format {
        self.config.format
    }

    /// Encode `value` into `<stem>.<ext>`.
    pub fn write_data<T: Serialize + ?Sized>(&self, stem: &str, value: &T) -> CodecResult<()> {
        let rel = format!("{stem}.{}", self.config.format.extension());
        let bytes = self
            .config
            .encode(value)
            .map_err(|reason| CodecError::Encode {
                path: rel.clone(),
                reason,
            })?;
        self.write_file(&rel, &bytes)
    }

    /// Encode an entity into `<stem>.<ext>`, writing `markdown` (when
    /// present) to the `<stem>.md` sidecar first.
    pub fn write_spec<T: Serialize + ?Sized>(
        &self,
        stem: &str,
        value: &T,
        markdown: Option<&str>,
    ) -> CodecResult<()> {
        if let Some(markdown) = markdown {
            let sidecar = format!("{stem}.{SIDECAR_EXTENSION}");
            self.write_file(&sidecar, markdown.as_bytes())?;
        }
        self.write_data(stem, value)
    }

    /// Write raw bytes to `rel` (a path including its extension), creating
    /// parent directories as needed.
    pub fn write_file(&self, rel: &str, bytes: &[u8]) -> CodecResult<()> {
        validate_relative(rel)?;
        let mut path = self.root.clone();
        path.extend(rel.split('/'));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CodecError::from_io(rel, e))?;
        }
        std::fs::write(&path, bytes).map_err(|e| CodecError::from_io(rel, e))?;
        debug!(path = %rel, bytes = bytes.len(), "wrote file");
        Ok(())
    }
}
