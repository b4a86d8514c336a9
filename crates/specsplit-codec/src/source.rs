use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{CodecError, CodecResult};

/// Read access to the files of a split tree.
///
/// Implementations must be safe to call from many threads at once; the
/// view fans entity loads out across a worker pool.
pub trait Source: Send + Sync {
    /// Read the file at `rel`, a `/`-separated path relative to the tree root.
    ///
    /// A missing file must be reported with [`io::ErrorKind::NotFound`].
    fn read_file(&self, rel: &str) -> io::Result<Vec<u8>>;
}

/// Reject relative paths that are empty, absolute, or climb out of the root.
pub fn validate_relative(rel: &str) -> CodecResult<()> {
    if rel.is_empty() || rel.contains('\\') {
        return Err(CodecError::InvalidPath(rel.to_string()));
    }
    let clean = Path::new(rel)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !clean || rel.split('/').any(|segment| segment.is_empty()) {
        return Err(CodecError::InvalidPath(rel.to_string()));
    }
    Ok(())
}

/// A split tree stored in a directory on disk.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Source for DirSource {
    fn read_file(&self, rel: &str) -> io::Result<Vec<u8>> {
        let mut path = self.root.clone();
        path.extend(rel.split('/'));
        std::fs::read(path)
    }
}

/// A split tree held entirely in memory.
///
/// Useful for trees embedded in a binary with `include_bytes!` and for
/// tests that should not touch the filesystem.
#[derive(Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, rel: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(rel.into(), contents.into());
    }

    /// Builder-style [`MemorySource::insert`].
    pub fn with_file(mut self, rel: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(rel, contents);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Source for MemorySource {
    fn read_file(&self, rel: &str) -> io::Result<Vec<u8>> {
        self.files
            .get(rel)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

impl fmt::Debug for MemorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySource")
            .field("file_count", &self.files.len())
            .finish()
    }
}
