//! High-level API for specsplit.
//!
//! Entry point for applications that split specification documents into
//! per-entity file trees and read them back, either in full or one entity
//! at a time.

pub mod error;
pub mod ops;
pub mod options;

pub use error::{SdkError, SdkResult};
pub use ops::{merge, open_view, read_document, split_file, write_document};
pub use options::MergeOptions;

// Re-export key types
pub use specsplit_codec::{CodecConfig, Format, MemorySource, Source};
pub use specsplit_index::TokenTable;
pub use specsplit_types::{
    resolve, EntityKind, FunctionSpec, PackageSpec, ResourceSpec, SpecEntity, Token, TypeSpec,
};
pub use specsplit_view::{MetadataOverlay, PartialView};
pub use specsplit_writer::{
    write_document_with_metadata, MetadataSet, SplitOptions, SplitSummary, SplitWriter,
};
