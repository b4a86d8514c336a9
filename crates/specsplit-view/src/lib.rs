//! Read side of a split specification tree.
//!
//! [`PartialView`] answers questions about a split tree without decoding
//! more than it has to. Asking for one resource reads the resource index
//! and that resource's file, nothing else. Every entity is decoded at most
//! once per view in the common case and, once published, the same
//! [`Arc`](std::sync::Arc) is handed to every caller on every thread.
//!
//! [`PartialView::read_document`] reassembles the full document, loading
//! all three kinds concurrently on the rayon pool.
//!
//! [`MetadataOverlay`] reads caller-defined `.meta` payloads stored next to
//! entity files, with caches of its own.

pub mod cache;
pub mod error;
pub mod overlay;
pub mod view;

pub use cache::EntityCache;
pub use error::{ViewError, ViewResult};
pub use overlay::MetadataOverlay;
pub use view::{CachedEntity, PartialView};
