use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;
use specsplit_codec::{SpecWriter, CORE_STEM, META_SUFFIX};
use specsplit_types::{resolve, EntityKind, PackageSpec, Section, SpecEntity};
use tracing::{debug, info};

use crate::error::{WriteError, WriteResult};
use crate::options::SplitOptions;

/// What a split produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub resources: usize,
    pub functions: usize,
    pub types: usize,
    /// Description sidecars written.
    pub sidecars: usize,
    /// Metadata files written.
    pub metadata: usize,
    /// Sections written outside the core file.
    pub sections: usize,
}

impl SplitSummary {
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Resource => self.resources,
            EntityKind::Function => self.functions,
            EntityKind::Type => self.types,
        }
    }

    pub fn entities(&self) -> usize {
        self.resources + self.functions + self.types
    }

    fn record(&mut self, kind: EntityKind, n: usize) {
        match kind {
            EntityKind::Resource => self.resources = n,
            EntityKind::Function => self.functions = n,
            EntityKind::Type => self.types = n,
        }
    }
}

/// Writes a document as a split tree under one root directory.
#[derive(Clone, Debug)]
pub struct SplitWriter {
    writer: SpecWriter,
    options: SplitOptions,
}

impl SplitWriter {
    pub fn new(root: impl Into<PathBuf>, options: SplitOptions) -> Self {
        Self {
            writer: SpecWriter::new(root, options.codec.clone()),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        self.writer.root()
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Write the core, every entity, and the three index files.
    ///
    /// Every token is resolved first; a malformed token or two tokens of one
    /// kind sharing a file fail the write before anything is written. Kinds
    /// are then written in resource, function, type order, and an I/O
    /// failure leaves whatever was already written in place.
    pub fn write(&self, doc: &PackageSpec) -> WriteResult<SplitSummary> {
        let resources = plan_paths(&doc.resources)?;
        let functions = plan_paths(&doc.functions)?;
        let types = plan_paths(&doc.types)?;

        let mut summary = SplitSummary::default();

        let mut core = doc.core();
        if self.options.split_sections {
            for section in Section::ALL {
                if let Some(value) = core.take_section(section) {
                    self.writer.write_data(section.file_stem(), &value)?;
                    summary.sections += 1;
                }
            }
        }
        self.writer.write_data(CORE_STEM, &core)?;

        self.write_collection(&doc.resources, resources, &mut summary)?;
        self.write_collection(&doc.functions, functions, &mut summary)?;
        self.write_collection(&doc.types, types, &mut summary)?;

        info!(
            root = %self.root().display(),
            resources = summary.resources,
            functions = summary.functions,
            types = summary.types,
            sidecars = summary.sidecars,
            "split document"
        );
        Ok(summary)
    }

    /// Write one entity at its resolved path and return that path.
    ///
    /// A description spanning several lines moves to the `.md` sidecar and
    /// the primary file carries an empty description.
    pub fn write_entity<E: SpecEntity>(&self, token: &str, entity: &E) -> WriteResult<String> {
        let path = resolve(token, E::KIND)?;
        self.write_entity_at(&path, entity)?;
        Ok(path)
    }

    fn write_entity_at<E: SpecEntity>(&self, path: &str, entity: &E) -> WriteResult<()> {
        let description = entity.description();
        if description.contains('\n') {
            let mut stripped = entity.clone();
            stripped.set_description(String::new());
            self.writer.write_spec(path, &stripped, Some(description))?;
        } else {
            self.writer.write_spec(path, entity, None)?;
        }
        Ok(())
    }

    /// Write a metadata payload for `token` next to its entity file.
    ///
    /// Works whether or not the token has a primary entity. The index files
    /// are left untouched.
    pub fn write_metadata<M: Serialize + ?Sized>(
        &self,
        kind: EntityKind,
        token: &str,
        meta: &M,
    ) -> WriteResult<String> {
        let path = resolve(token, kind)?;
        self.writer.write_data(&format!("{path}{META_SUFFIX}"), meta)?;
        Ok(path)
    }

    fn write_collection<E: SpecEntity>(
        &self,
        entities: &BTreeMap<String, E>,
        paths: Vec<String>,
        summary: &mut SplitSummary,
    ) -> WriteResult<()> {
        let kind = E::KIND;
        let mut index = BTreeMap::new();
        for ((token, entity), path) in entities.iter().zip(paths) {
            self.write_entity_at(&path, entity)?;
            if entity.description().contains('\n') {
                summary.sidecars += 1;
            }
            index.insert(token.as_str(), path);
        }
        self.writer.write_data(kind.dir_name(), &index)?;
        summary.record(kind, index.len());
        debug!(kind = %kind, entities = index.len(), "wrote index");
        Ok(())
    }
}

/// Resolve every token of one collection, in map order, refusing two
/// tokens that land on the same file.
fn plan_paths<E: SpecEntity>(entities: &BTreeMap<String, E>) -> WriteResult<Vec<String>> {
    let mut owners: HashMap<String, &str> = HashMap::with_capacity(entities.len());
    let mut paths = Vec::with_capacity(entities.len());
    for token in entities.keys() {
        let path = resolve(token, E::KIND)?;
        if let Some(first) = owners.insert(path.clone(), token) {
            return Err(WriteError::PathCollision {
                kind: E::KIND,
                path,
                first: first.to_string(),
                second: token.clone(),
            });
        }
        paths.push(path);
    }
    Ok(paths)
}

/// Split `doc` into a tree rooted at `root`.
pub fn write_document(
    root: impl Into<PathBuf>,
    doc: &PackageSpec,
    options: SplitOptions,
) -> WriteResult<SplitSummary> {
    SplitWriter::new(root, options).write(doc)
}
