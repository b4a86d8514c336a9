use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use serde_json::Value;
use specsplit_codec::{CodecError, Format, Source, SpecReader, CORE_STEM};
use specsplit_index::{PublishOnce, TokenIndex, TokenTable};
use specsplit_types::{
    EntityKind, FunctionSpec, PackageSpec, ResourceSpec, Section, SpecEntity, TypeSpec,
};
use tracing::{debug, warn};

use crate::cache::EntityCache;
use crate::error::{ViewError, ViewResult};

/// An entity type with a cache slot in [`PartialView`].
pub trait CachedEntity: SpecEntity {
    fn cache(view: &PartialView) -> &EntityCache<Self>;
}

impl CachedEntity for ResourceSpec {
    fn cache(view: &PartialView) -> &EntityCache<Self> {
        &view.resources
    }
}

impl CachedEntity for FunctionSpec {
    fn cache(view: &PartialView) -> &EntityCache<Self> {
        &view.functions
    }
}

impl CachedEntity for TypeSpec {
    fn cache(view: &PartialView) -> &EntityCache<Self> {
        &view.types
    }
}

/// Lazy, shareable view over a split tree.
///
/// `PartialView` is `Sync`; share it behind an `Arc` or borrow it across
/// scoped threads. Nothing is read until asked for.
#[derive(Debug)]
pub struct PartialView {
    reader: SpecReader,
    index: TokenIndex,
    core: PublishOnce<PackageSpec>,
    resources: EntityCache<ResourceSpec>,
    functions: EntityCache<FunctionSpec>,
    types: EntityCache<TypeSpec>,
}

impl PartialView {
    pub fn new(reader: SpecReader) -> Self {
        Self {
            index: TokenIndex::new(reader.clone()),
            reader,
            core: PublishOnce::new(),
            resources: EntityCache::new(),
            functions: EntityCache::new(),
            types: EntityCache::new(),
        }
    }

    /// View over a JSON tree on disk.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::open_with_format(root, Format::Json)
    }

    pub fn open_with_format(root: impl Into<PathBuf>, format: Format) -> Self {
        Self::new(SpecReader::open_dir(root, format))
    }

    pub fn with_source(source: Arc<dyn Source>, format: Format) -> Self {
        Self::new(SpecReader::new(source, format))
    }

    pub fn reader(&self) -> &SpecReader {
        &self.reader
    }

    pub fn index(&self) -> &TokenIndex {
        &self.index
    }

    /// Core fields, with any separately stored sections spliced back in.
    /// Collections are always empty.
    pub fn core(&self) -> ViewResult<Arc<PackageSpec>> {
        self.core.get_or_try_publish(|| self.load_core())
    }

    /// Sorted tokens and paths for `kind`.
    pub fn tokens(&self, kind: EntityKind) -> ViewResult<Arc<TokenTable>> {
        Ok(self.index.get(kind)?)
    }

    pub fn entity<E: CachedEntity>(&self, token: &str) -> ViewResult<Option<Arc<E>>> {
        E::cache(self).get(token, &self.index, &self.reader)
    }

    pub fn resource(&self, token: &str) -> ViewResult<Option<Arc<ResourceSpec>>> {
        self.entity(token)
    }

    pub fn function(&self, token: &str) -> ViewResult<Option<Arc<FunctionSpec>>> {
        self.entity(token)
    }

    pub fn complex_type(&self, token: &str) -> ViewResult<Option<Arc<TypeSpec>>> {
        self.entity(token)
    }

    /// Materialise the whole document.
    ///
    /// Kinds load concurrently and every entity of a kind loads in
    /// parallel. A kind's batch always runs to completion; if anything in
    /// it failed the read fails with [`ViewError::Batch`]. When several
    /// kinds fail, resources are reported before functions before types.
    pub fn read_document(&self) -> ViewResult<PackageSpec> {
        let core = self.core()?;
        let (resources, (functions, types)) = rayon::join(
            || self.load_all::<ResourceSpec>(),
            || {
                rayon::join(
                    || self.load_all::<FunctionSpec>(),
                    || self.load_all::<TypeSpec>(),
                )
            },
        );

        let mut doc = PackageSpec::clone(&core);
        doc.resources = resources?;
        doc.functions = functions?;
        doc.types = types?;
        Ok(doc)
    }

    fn load_core(&self) -> ViewResult<PackageSpec> {
        let mut core: PackageSpec = self.reader.read_data(CORE_STEM)?;
        for section in Section::ALL {
            let stem = section.file_stem();
            if let Some(value) = self.reader.read_optional::<Value>(stem)? {
                core.set_section(section, value)
                    .map_err(|e| CodecError::Decode {
                        path: format!("{stem}.{}", self.reader.format().extension()),
                        reason: e.to_string(),
                    })?;
            }
        }
        Ok(core)
    }

    fn load_all<E: CachedEntity>(&self) -> ViewResult<BTreeMap<String, E>> {
        let kind = E::KIND;
        let table = self.tokens(kind)?;
        let results: Vec<ViewResult<Option<Arc<E>>>> = table
            .tokens()
            .par_iter()
            .map(|token| self.entity::<E>(token))
            .collect();

        let mut entities = BTreeMap::new();
        let mut failures = 0;
        let mut first = None;
        for (token, result) in table.tokens().iter().zip(results) {
            match result {
                Ok(Some(entity)) => {
                    entities.insert(token.clone(), E::clone(&entity));
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(kind = %kind, token = %token, error = %error, "failed to load entity");
                    failures += 1;
                    if first.is_none() {
                        first = Some(error);
                    }
                }
            }
        }

        if let Some(source) = first {
            return Err(ViewError::Batch {
                kind,
                failures,
                source: Box::new(source),
            });
        }
        debug!(kind = %kind, entities = entities.len(), "loaded batch");
        Ok(entities)
    }
}
