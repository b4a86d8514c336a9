use serde::{Deserialize, Serialize};
use specsplit_codec::{CodecConfig, Format};

/// Settings for reassembling a split tree into one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Format the split tree was written in.
    pub format: Format,
    /// Write the merged JSON without whitespace.
    pub compact: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            format: Format::Json,
            compact: false,
        }
    }
}

impl MergeOptions {
    /// Encoding for the merged file: always JSON, two-space indent unless compact.
    pub fn output_codec(&self) -> CodecConfig {
        CodecConfig {
            format: Format::Json,
            compact: self.compact,
            indent: 2,
        }
    }
}
