//! Token indices for split specification trees.
//!
//! Each entity kind has one index file at the tree root mapping every token
//! of that kind to the relative path of its entity file. A [`TokenIndex`]
//! loads a kind's file on first use and publishes the result exactly once;
//! every later reader gets the same [`TokenTable`] without taking a lock.
//!
//! [`PublishOnce`] is the primitive underneath: an atomically swappable
//! slot that accepts its first value and hands that value to everyone,
//! including callers that lost the race.

pub mod index;
pub mod publish;
pub mod table;

pub use index::TokenIndex;
pub use publish::PublishOnce;
pub use table::TokenTable;
