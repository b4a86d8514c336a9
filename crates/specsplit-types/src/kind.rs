use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// The collection an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Resource,
    Function,
    Type,
}

impl EntityKind {
    /// Every kind, in the order the writer and the full read process them.
    pub const ALL: [Self; 3] = [Self::Resource, Self::Function, Self::Type];

    /// Directory name used under a module segment, and the stem of the
    /// kind's index file at the storage root.
    pub const fn dir_name(&self) -> &'static str {
        match self {
            Self::Resource => "resources",
            Self::Function => "functions",
            Self::Type => "types",
        }
    }

    /// Position of this kind in [`EntityKind::ALL`].
    pub const fn ordinal(&self) -> usize {
        match self {
            Self::Resource => 0,
            Self::Function => 1,
            Self::Type => 2,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for EntityKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resource" | "resources" => Ok(Self::Resource),
            "function" | "functions" => Ok(Self::Function),
            "type" | "types" => Ok(Self::Type),
            other => Err(TypeError::UnknownKind(other.to_string())),
        }
    }
}
