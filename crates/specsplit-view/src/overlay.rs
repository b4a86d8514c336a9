use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use specsplit_codec::META_SUFFIX;
use specsplit_types::{resolve, EntityKind};

use crate::cache::EntityCache;
use crate::error::ViewResult;
use crate::view::PartialView;

/// Caller-typed metadata read from `.meta` files beside entity files.
///
/// `R`, `F` and `T` are the payload types for resources, functions and
/// types. Paths come from the resolver rather than the index, so metadata
/// for a token with no entity is still found. Each kind has its own cache,
/// separate from the view's entity caches.
#[derive(Debug)]
pub struct MetadataOverlay<R, F, T> {
    view: PartialView,
    resources: EntityCache<R>,
    functions: EntityCache<F>,
    types: EntityCache<T>,
}

impl<R, F, T> MetadataOverlay<R, F, T>
where
    R: DeserializeOwned,
    F: DeserializeOwned,
    T: DeserializeOwned,
{
    pub fn new(view: PartialView) -> Self {
        Self {
            view,
            resources: EntityCache::new(),
            functions: EntityCache::new(),
            types: EntityCache::new(),
        }
    }

    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::new(PartialView::open(root))
    }

    /// The underlying entity view.
    pub fn view(&self) -> &PartialView {
        &self.view
    }

    pub fn resource_meta(&self, token: &str) -> ViewResult<Option<Arc<R>>> {
        self.load(&self.resources, EntityKind::Resource, token)
    }

    pub fn function_meta(&self, token: &str) -> ViewResult<Option<Arc<F>>> {
        self.load(&self.functions, EntityKind::Function, token)
    }

    pub fn type_meta(&self, token: &str) -> ViewResult<Option<Arc<T>>> {
        self.load(&self.types, EntityKind::Type, token)
    }

    fn load<M: DeserializeOwned>(
        &self,
        cache: &EntityCache<M>,
        kind: EntityKind,
        token: &str,
    ) -> ViewResult<Option<Arc<M>>> {
        let path = resolve(token, kind)?;
        cache.get_or_load(token, || {
            Ok(self
                .view
                .reader()
                .read_optional(&format!("{path}{META_SUFFIX}"))?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use serde::{Deserialize, Serialize};
    use specsplit_types::{PackageSpec, ResourceSpec, TypeError};
    use specsplit_writer::{write_document_with_metadata, MetadataSet, SplitOptions, SplitWriter};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Review {
        approved: bool,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Owner {
        team: String,
    }

    type Overlay = MetadataOverlay<Review, (), Owner>;

    fn doc() -> PackageSpec {
        let mut doc = PackageSpec {
            name: "acme".into(),
            ..Default::default()
        };
        doc.resources.insert(
            "acme:net:Router".into(),
            ResourceSpec {
                description: "Routes.".into(),
                ..Default::default()
            },
        );
        doc
    }

    #[test]
    fn metadata_and_entity_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let mut meta: MetadataSet<Review, (), Owner> = MetadataSet::new();
        meta.resources
            .insert("acme:net:Router".into(), Review { approved: true });
        write_document_with_metadata(dir.path(), &doc(), &meta, SplitOptions::default()).unwrap();

        let overlay = Overlay::open(dir.path());
        let review = overlay.resource_meta("acme:net:Router").unwrap().unwrap();
        assert_eq!(*review, Review { approved: true });

        let router = overlay.view().resource("acme:net:Router").unwrap().unwrap();
        assert_eq!(router.description, "Routes.");
        assert_eq!(overlay.view().read_document().unwrap(), doc());
    }

    #[test]
    fn metadata_without_entity_is_retrievable() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SplitWriter::new(dir.path(), SplitOptions::default());
        writer.write(&doc()).unwrap();
        writer
            .write_metadata(EntityKind::Type, "acme:net:Cidr", &Owner { team: "net".into() })
            .unwrap();

        let overlay = Overlay::open(dir.path());
        let owner = overlay.type_meta("acme:net:Cidr").unwrap().unwrap();
        assert_eq!(owner.team, "net");
        assert!(overlay.view().complex_type("acme:net:Cidr").unwrap().is_none());
    }

    #[test]
    fn entity_without_metadata_is_none() {
        let dir = tempfile::tempdir().unwrap();
        SplitWriter::new(dir.path(), SplitOptions::default())
            .write(&doc())
            .unwrap();
        let overlay = Overlay::open(dir.path());
        assert!(overlay.resource_meta("acme:net:Router").unwrap().is_none());
    }

    #[test]
    fn metadata_is_cached_per_token() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SplitWriter::new(dir.path(), SplitOptions::default());
        writer
            .write_metadata(EntityKind::Resource, "acme:net:Router", &Review { approved: false })
            .unwrap();

        let overlay = Overlay::open(dir.path());
        let a = overlay.resource_meta("acme:net:Router").unwrap().unwrap();
        let b = overlay.resource_meta("acme:net:Router").unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn invalid_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = Overlay::open(dir.path());
        let err = overlay.function_meta("bad").unwrap_err();
        assert!(matches!(err, ViewError::Token(TypeError::InvalidToken { .. })));
    }
}
