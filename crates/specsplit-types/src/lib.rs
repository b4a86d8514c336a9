//! Foundation types for specsplit.
//!
//! This crate provides the pieces every other specsplit crate agrees on:
//! how a qualified token is parsed, which directory each entity kind lives
//! in, how a token maps onto a relative file path, and the shape of the
//! document being split.
//!
//! # Key Types
//!
//! - [`Token`]: parsed `package:module[/submodule]:Name` token
//! - [`EntityKind`]: resource, function, or type
//! - [`resolve`]: pure token → relative path mapping
//! - [`PackageSpec`]: the full document (core fields + three collections)
//! - [`SpecEntity`]: trait implemented by [`ResourceSpec`], [`FunctionSpec`]
//!   and [`TypeSpec`]

pub mod document;
pub mod error;
pub mod kind;
pub mod token;

pub use document::{FunctionSpec, PackageSpec, ResourceSpec, Section, SpecEntity, TypeSpec};
pub use error::{TypeError, TypeResult};
pub use kind::EntityKind;
pub use token::{file_stem, resolve, Token};
