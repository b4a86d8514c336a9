//! File codec for split specification trees.
//!
//! Every file in a split tree is addressed by a relative path without an
//! extension. The codec appends the extension of the configured [`Format`],
//! serializes or deserializes the value, and handles the `.md` sidecar that
//! carries multi-line descriptions.
//!
//! # Architecture
//!
//! - [`SpecWriter`]: writes values under a root directory, creating parent
//!   directories as needed
//! - [`SpecReader`]: reads values through any [`Source`]
//! - [`DirSource`]: a directory on disk
//! - [`MemorySource`]: an in-memory file map for embedded trees and tests
//!
//! # Design Rules
//!
//! 1. Relative paths always use `/`; readers refuse paths that would leave
//!    the storage root.
//! 2. A missing primary file is [`CodecError::NotFound`]; a missing sidecar
//!    is not an error.
//! 3. Nothing is retried.

pub mod error;
pub mod format;
pub mod reader;
pub mod source;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use format::{CodecConfig, Format};
pub use reader::SpecReader;
pub use source::{DirSource, MemorySource, Source};
pub use writer::SpecWriter;

/// Stem of the file holding the document's core fields.
pub const CORE_STEM: &str = "core";

/// Extension of the description sidecar.
pub const SIDECAR_EXTENSION: &str = "md";

/// Suffix appended to an entity path to address its metadata file.
pub const META_SUFFIX: &str = ".meta";
