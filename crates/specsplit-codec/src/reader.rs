use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::format::Format;
use crate::source::{validate_relative, DirSource, Source};
use crate::SIDECAR_EXTENSION;

/// Decodes files of a split tree from a [`Source`].
///
/// Cheap to clone; clones share the underlying source.
#[derive(Clone)]
pub struct SpecReader {
    source: Arc<dyn Source>,
    format: Format,
}

impl SpecReader {
    pub fn new(source: Arc<dyn Source>, format: Format) -> Self {
        Self { source, format }
    }

    /// Reader over a directory on disk.
    pub fn open_dir(root: impl Into<std::path::PathBuf>, format: Format) -> Self {
        Self::new(Arc::new(DirSource::new(root)), format)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Read raw bytes of `rel` (a path including its extension).
    pub fn read_bytes(&self, rel: &str) -> CodecResult<Vec<u8>> {
        validate_relative(rel)?;
        self.source
            .read_file(rel)
            .map_err(|e| CodecError::from_io(rel, e))
    }

    /// Decode `<stem>.<ext>`.
    pub fn read_data<T: DeserializeOwned>(&self, stem: &str) -> CodecResult<T> {
        let rel = format!("{stem}.{}", self.format.extension());
        let bytes = self.read_bytes(&rel)?;
        let value = self
            .format
            .decode(&bytes)
            .map_err(|reason| CodecError::Decode {
                path: rel.clone(),
                reason,
            })?;
        debug!(path = %rel, bytes = bytes.len(), "decoded file");
        Ok(value)
    }

    /// Decode `<stem>.<ext>`, treating a missing file as `None`.
    pub fn read_optional<T: DeserializeOwned>(&self, stem: &str) -> CodecResult<Option<T>> {
        match self.read_data(stem) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Decode an entity file and its optional `.md` description sidecar.
    ///
    /// The sidecar is returned separately so the caller can splice it into
    /// the decoded value. Only a missing sidecar is tolerated; a missing
    /// primary file is always an error.
    pub fn read_spec<T: DeserializeOwned>(&self, stem: &str) -> CodecResult<(T, Option<String>)> {
        let sidecar = format!("{stem}.{SIDECAR_EXTENSION}");
        let description = match self.read_bytes(&sidecar) {
            Ok(bytes) => Some(String::from_utf8(bytes).map_err(|e| CodecError::Decode {
                path: sidecar.clone(),
                reason: e.to_string(),
            })?),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };
        let value = self.read_data(stem)?;
        Ok((value, description))
    }
}

impl std::fmt::Debug for SpecReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecReader")
            .field("format", &self.format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use std::collections::BTreeMap;

    fn reader(source: MemorySource) -> SpecReader {
        SpecReader::new(Arc::new(source), Format::Json)
    }

    #[test]
    fn read_data_appends_extension() {
        let r = reader(MemorySource::new().with_file("types.json", br#"{"a:b:C":"b/types/c"}"#.to_vec()));
        let map: BTreeMap<String, String> = r.read_data("types").unwrap();
        assert_eq!(map["a:b:C"], "b/types/c");
    }

    #[test]
    fn missing_primary_is_not_found() {
        let r = reader(MemorySource::new());
        let err = r.read_data::<BTreeMap<String, String>>("core").unwrap_err();
        assert!(matches!(err, CodecError::NotFound(ref p) if p == "core.json"));
    }

    #[test]
    fn malformed_content_is_decode_error() {
        let r = reader(MemorySource::new().with_file("core.json", b"{oops".to_vec()));
        let err = r.read_data::<BTreeMap<String, String>>("core").unwrap_err();
        assert!(matches!(err, CodecError::Decode { ref path, .. } if path == "core.json"));
    }

    #[test]
    fn read_optional_swallows_not_found_only() {
        let r = reader(MemorySource::new().with_file("bad.json", b"[".to_vec()));
        assert!(r.read_optional::<serde_json::Value>("absent").unwrap().is_none());
        assert!(r.read_optional::<serde_json::Value>("bad").is_err());
    }

    #[test]
    fn read_spec_with_and_without_sidecar() {
        let source = MemorySource::new()
            .with_file("m/types/x.json", b"{}".to_vec())
            .with_file("m/types/y.json", b"{}".to_vec())
            .with_file("m/types/y.md", b"line1\nline2".to_vec());
        let r = reader(source);

        let (_, description): (serde_json::Value, _) = r.read_spec("m/types/x").unwrap();
        assert!(description.is_none());

        let (_, description): (serde_json::Value, _) = r.read_spec("m/types/y").unwrap();
        assert_eq!(description.as_deref(), Some("line1\nline2"));
    }

    #[test]
    fn read_spec_without_primary_fails_even_with_sidecar() {
        let r = reader(MemorySource::new().with_file("m/types/z.md", b"a\nb".to_vec()));
        let err = r.read_spec::<serde_json::Value>("m/types/z").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn escaping_paths_are_refused() {
        let r = reader(MemorySource::new());
        let err = r.read_data::<serde_json::Value>("../outside").unwrap_err();
        assert!(matches!(err, CodecError::InvalidPath(_)));
    }

    #[test]
    fn yaml_reader() {
        let source = MemorySource::new().with_file("core.yaml", b"name: aws\n".to_vec());
        let r = SpecReader::new(Arc::new(source), Format::Yaml);
        let value: BTreeMap<String, String> = r.read_data("core").unwrap();
        assert_eq!(value["name"], "aws");
    }
}
