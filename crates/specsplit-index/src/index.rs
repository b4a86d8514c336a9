use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use specsplit_codec::{CodecResult, SpecReader};
use specsplit_types::EntityKind;
use tracing::debug;

use crate::publish::PublishOnce;
use crate::table::TokenTable;

/// Lazily loaded token indices, one per entity kind.
///
/// A kind's index file is decoded the first time that kind is asked for.
/// Concurrent first calls may decode it more than once, but every caller
/// ends up holding the same published table. A failed load is not cached.
#[derive(Debug)]
pub struct TokenIndex {
    reader: SpecReader,
    tables: [PublishOnce<TokenTable>; 3],
    loads: AtomicUsize,
}

impl TokenIndex {
    pub fn new(reader: SpecReader) -> Self {
        Self {
            reader,
            tables: Default::default(),
            loads: AtomicUsize::new(0),
        }
    }

    /// The token table for `kind`, loading it on first use.
    pub fn get(&self, kind: EntityKind) -> CodecResult<Arc<TokenTable>> {
        self.tables[kind.ordinal()].get_or_try_publish(|| self.load(kind))
    }

    /// Path of `token`'s entity file, if the token is indexed.
    pub fn path(&self, kind: EntityKind, token: &str) -> CodecResult<Option<String>> {
        Ok(self.get(kind)?.path(token).map(str::to_owned))
    }

    pub fn is_loaded(&self, kind: EntityKind) -> bool {
        self.tables[kind.ordinal()].is_published()
    }

    /// Number of index files decoded so far, including race losers.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    fn load(&self, kind: EntityKind) -> CodecResult<TokenTable> {
        let paths: HashMap<String, String> = self.reader.read_data(kind.dir_name())?;
        self.loads.fetch_add(1, Ordering::Relaxed);
        debug!(kind = %kind, tokens = paths.len(), "loaded token index");
        Ok(TokenTable::new(paths))
    }
}
