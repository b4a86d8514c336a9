use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use specsplit_types::{EntityKind, PackageSpec};
use tracing::debug;

use crate::error::WriteResult;
use crate::options::SplitOptions;
use crate::writer::{SplitSummary, SplitWriter};

/// Caller-defined metadata payloads, one map per entity kind, keyed by token.
///
/// Each kind may carry its own payload type. Tokens need not exist in the
/// document.
#[derive(Clone, Debug)]
pub struct MetadataSet<R, F, T> {
    pub resources: BTreeMap<String, R>,
    pub functions: BTreeMap<String, F>,
    pub types: BTreeMap<String, T>,
}

impl<R, F, T> Default for MetadataSet<R, F, T> {
    fn default() -> Self {
        Self {
            resources: BTreeMap::new(),
            functions: BTreeMap::new(),
            types: BTreeMap::new(),
        }
    }
}

impl<R, F, T> MetadataSet<R, F, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.resources.len() + self.functions.len() + self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Serialize, F: Serialize, T: Serialize> MetadataSet<R, F, T> {
    /// Write every payload through `writer`, returning how many were written.
    pub fn write_to(&self, writer: &SplitWriter) -> WriteResult<usize> {
        let mut written = 0;
        written += write_kind(writer, EntityKind::Resource, &self.resources)?;
        written += write_kind(writer, EntityKind::Function, &self.functions)?;
        written += write_kind(writer, EntityKind::Type, &self.types)?;
        Ok(written)
    }
}

fn write_kind<M: Serialize>(
    writer: &SplitWriter,
    kind: EntityKind,
    entries: &BTreeMap<String, M>,
) -> WriteResult<usize> {
    for (token, meta) in entries {
        writer.write_metadata(kind, token, meta)?;
    }
    debug!(kind = %kind, entries = entries.len(), "wrote metadata");
    Ok(entries.len())
}

/// Split `doc` and write `meta` alongside it.
///
/// Metadata goes out after the primary tree, so a token present in both
/// ends up with both files.
pub fn write_document_with_metadata<R, F, T>(
    root: impl Into<PathBuf>,
    doc: &PackageSpec,
    meta: &MetadataSet<R, F, T>,
    options: SplitOptions,
) -> WriteResult<SplitSummary>
where
    R: Serialize,
    F: Serialize,
    T: Serialize,
{
    let writer = SplitWriter::new(root, options);
    let mut summary = writer.write(doc)?;
    summary.metadata = meta.write_to(&writer)?;
    Ok(summary)
}
