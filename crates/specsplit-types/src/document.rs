//! The document model: a package specification with three token-keyed
//! collections.
//!
//! Entity contents are opaque. Apart from `description`, every field of an
//! entity is kept as a raw JSON value so that anything the producer put in
//! the document survives a split and merge untouched.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TypeError, TypeResult};
use crate::kind::EntityKind;

/// An entity stored in one of the document's collections.
///
/// The only field the splitter interprets is the description: multi-line
/// descriptions are moved to a `.md` sidecar on write and spliced back on
/// read.
pub trait SpecEntity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection this entity type belongs to.
    const KIND: EntityKind;

    fn description(&self) -> &str;

    fn set_description(&mut self, description: String);
}

/// A resource definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Every other field, untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A function (invoke) definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A complex type definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SpecEntity for ResourceSpec {
    const KIND: EntityKind = EntityKind::Resource;

    fn description(&self) -> &str {
        &self.description
    }

    fn set_description(&mut self, description: String) {
        self.description = description;
    }
}

impl SpecEntity for FunctionSpec {
    const KIND: EntityKind = EntityKind::Function;

    fn description(&self) -> &str {
        &self.description
    }

    fn set_description(&mut self, description: String) {
        self.description = description;
    }
}

impl SpecEntity for TypeSpec {
    const KIND: EntityKind = EntityKind::Type;

    fn description(&self) -> &str {
        &self.description
    }

    fn set_description(&mut self, description: String) {
        self.description = description;
    }
}

/// Structured top-level sections that can optionally live in their own
/// files at the storage root instead of inside `core`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Language,
    Config,
    Provider,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::Language, Self::Config, Self::Provider];

    /// Stem of the section's file at the storage root.
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Config => "config",
            Self::Provider => "provider",
        }
    }
}

/// The full document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(
        default,
        rename = "pluginDownloadURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub plugin_download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_package_names: Vec<String>,
    /// Per-language generator settings, keyed by language name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ResourceSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub functions: BTreeMap<String, FunctionSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, TypeSpec>,

    /// Top-level fields this model does not name, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageSpec {
    /// A copy of the core fields with all three collections left empty.
    pub fn core(&self) -> Self {
        Self {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            keywords: self.keywords.clone(),
            homepage: self.homepage.clone(),
            license: self.license.clone(),
            attribution: self.attribution.clone(),
            repository: self.repository.clone(),
            logo_url: self.logo_url.clone(),
            plugin_download_url: self.plugin_download_url.clone(),
            publisher: self.publisher.clone(),
            meta: self.meta.clone(),
            allowed_package_names: self.allowed_package_names.clone(),
            language: self.language.clone(),
            config: self.config.clone(),
            provider: self.provider.clone(),
            resources: BTreeMap::new(),
            functions: BTreeMap::new(),
            types: BTreeMap::new(),
            extra: self.extra.clone(),
        }
    }

    /// Number of entities in the given collection.
    pub fn entity_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Resource => self.resources.len(),
            EntityKind::Function => self.functions.len(),
            EntityKind::Type => self.types.len(),
        }
    }

    /// Remove a section from the core, returning it as a JSON value.
    ///
    /// Returns `None` when the section is absent (an empty language map
    /// counts as absent).
    pub fn take_section(&mut self, section: Section) -> Option<Value> {
        match section {
            Section::Language => {
                if self.language.is_empty() {
                    return None;
                }
                let language = std::mem::take(&mut self.language);
                Some(Value::Object(language.into_iter().collect()))
            }
            Section::Config => self.config.take(),
            Section::Provider => self.provider.take(),
        }
    }

    /// Put a section value back into the core.
    ///
    /// The language section must be a JSON object.
    pub fn set_section(&mut self, section: Section, value: Value) -> TypeResult<()> {
        match section {
            Section::Language => match value {
                Value::Object(map) => self.language = map.into_iter().collect(),
                other => {
                    return Err(TypeError::InvalidSection {
                        section: section.file_stem(),
                        reason: format!("expected an object, found {other}"),
                    })
                }
            },
            Section::Config => self.config = Some(value),
            Section::Provider => self.provider = Some(value),
        }
        Ok(())
    }
}
