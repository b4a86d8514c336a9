//! Split writer for specification documents.
//!
//! Takes a [`PackageSpec`](specsplit_types::PackageSpec) apart into a tree:
//!
//! ```text
//! core.json                              core fields, collections stripped
//! resources.json functions.json types.json   token -> path indices
//! <module>/resources/<stem>.json [+ .md]     one file per entity
//! ```
//!
//! Entities with multi-line descriptions get a markdown sidecar. Optional
//! per-entity metadata is written next to the entity as `<stem>.meta.json`.
//!
//! Writing is sequential and not transactional; callers wanting atomic
//! replacement should write to a staging directory and rename it.

pub mod error;
pub mod metadata;
pub mod options;
pub mod writer;

pub use error::{WriteError, WriteResult};
pub use metadata::{write_document_with_metadata, MetadataSet};
pub use options::SplitOptions;
pub use writer::{write_document, SplitSummary, SplitWriter};
