use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// On-disk encoding of every non-sidecar file in a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// File extension, without the leading dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Decode bytes in this format.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, String> {
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(CodecError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Encoding settings shared by writers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// File format for values.
    pub format: Format,
    /// Emit JSON without whitespace. Ignored for YAML.
    pub compact: bool,
    /// Spaces per indentation level for pretty JSON.
    pub indent: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            format: Format::Json,
            compact: false,
            indent: 4,
        }
    }
}

impl CodecConfig {
    /// Default settings for the given format.
    pub fn with_format(format: Format) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Compact JSON, as used for machine-only trees.
    pub fn compact() -> Self {
        Self {
            compact: true,
            ..Default::default()
        }
    }

    /// Encode a value according to these settings.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, String> {
        match self.format {
            Format::Json if self.compact => serde_json::to_vec(value).map_err(|e| e.to_string()),
            Format::Json => {
                let indent = " ".repeat(self.indent);
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                value
                    .serialize(&mut serializer)
                    .map_err(|e| e.to_string())?;
                Ok(buf)
            }
            Format::Yaml => serde_yaml::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| e.to_string()),
        }
    }
}
