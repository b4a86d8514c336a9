use serde::{Deserialize, Serialize};
use specsplit_codec::{CodecConfig, Format};

/// Settings for a split.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOptions {
    pub codec: CodecConfig,
    /// Write language, config and provider sections to their own files
    /// instead of keeping them inside the core file.
    #[serde(default)]
    pub split_sections: bool,
}

impl SplitOptions {
    pub fn with_format(format: Format) -> Self {
        Self {
            codec: CodecConfig::with_format(format),
            ..Default::default()
        }
    }

    pub fn format(&self) -> Format {
        self.codec.format
    }
}
