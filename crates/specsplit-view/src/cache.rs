use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use specsplit_codec::SpecReader;
use specsplit_index::TokenIndex;
use specsplit_types::{SpecEntity, Token};

use crate::error::ViewResult;

/// Append-only, per-token cache with first-writer-wins publication.
///
/// Readers never block each other on a hit. On a miss the caller decodes
/// outside any lock, then publishes; if another thread published first the
/// fresh value is dropped and the existing one returned. Entries are never
/// replaced or evicted.
pub struct EntityCache<V> {
    entries: DashMap<String, Arc<V>>,
    decodes: AtomicUsize,
}

impl<V> EntityCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            decodes: AtomicUsize::new(0),
        }
    }

    /// The published value for `token`, without loading.
    pub fn cached(&self, token: &str) -> Option<Arc<V>> {
        self.entries.get(token).map(|entry| Arc::clone(entry.value()))
    }

    /// Insert `value` unless `token` already has one; returns the canonical value.
    pub fn publish(&self, token: &str, value: V) -> Arc<V> {
        let entry = self
            .entries
            .entry(token.to_owned())
            .or_insert_with(|| Arc::new(value));
        Arc::clone(entry.value())
    }

    /// Return the cached value or run `load` and publish what it yields.
    ///
    /// `Ok(None)` from `load` is passed through and nothing is cached.
    pub fn get_or_load(
        &self,
        token: &str,
        load: impl FnOnce() -> ViewResult<Option<V>>,
    ) -> ViewResult<Option<Arc<V>>> {
        if let Some(hit) = self.cached(token) {
            return Ok(Some(hit));
        }
        let Some(value) = load()? else {
            return Ok(None);
        };
        self.decodes.fetch_add(1, Ordering::Relaxed);
        Ok(Some(self.publish(token, value)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values decoded so far, including ones discarded after losing a race.
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }
}

impl<E: SpecEntity> EntityCache<E> {
    /// Look up an entity by token, reading it through `index` and `reader`
    /// on a miss.
    ///
    /// A malformed token is an error. A well-formed token that the index
    /// does not list yields `Ok(None)`.
    pub fn get(
        &self,
        token: &str,
        index: &TokenIndex,
        reader: &SpecReader,
    ) -> ViewResult<Option<Arc<E>>> {
        Token::parse(token)?;
        self.get_or_load(token, || {
            let Some(path) = index.path(E::KIND, token)? else {
                return Ok(None);
            };
            let (mut entity, description): (E, _) = reader.read_spec(&path)?;
            if let Some(description) = description {
                entity.set_description(description);
            }
            Ok(Some(entity))
        })
    }
}

impl<V> Default for EntityCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for EntityCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCache")
            .field("entries", &self.entries.len())
            .field("decodes", &self.decode_count())
            .finish()
    }
}
