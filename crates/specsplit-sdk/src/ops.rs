use std::path::{Path, PathBuf};

use specsplit_codec::Format;
use specsplit_types::PackageSpec;
use specsplit_view::PartialView;
use specsplit_writer::{SplitOptions, SplitSummary};
use tracing::info;

use crate::error::{SdkError, SdkResult};
use crate::options::MergeOptions;

pub use specsplit_writer::write_document;

/// Open a lazy view over the JSON tree at `root`.
pub fn open_view(root: impl Into<PathBuf>) -> PartialView {
    PartialView::open(root)
}

/// Read the whole JSON tree at `root` into memory.
pub fn read_document(root: impl Into<PathBuf>) -> SdkResult<PackageSpec> {
    Ok(open_view(root).read_document()?)
}

/// Split a single-file document into a tree under `dest`.
///
/// The source is decoded as YAML when its extension says so and as JSON
/// otherwise. `dest` is created if missing.
pub fn split_file(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: SplitOptions,
) -> SdkResult<SplitSummary> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    let bytes = std::fs::read(source).map_err(|e| io_error(source, e))?;
    let doc: PackageSpec = source_format(source)
        .decode(&bytes)
        .map_err(|reason| SdkError::Parse {
            path: source.display().to_string(),
            reason,
        })?;

    std::fs::create_dir_all(dest).map_err(|e| io_error(dest, e))?;
    Ok(write_document(dest, &doc, options)?)
}

/// Reassemble the tree at `source` into a single JSON file at `dest`.
///
/// Returns the merged document.
pub fn merge(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: &MergeOptions,
) -> SdkResult<PackageSpec> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    let doc = PartialView::open_with_format(source, options.format).read_document()?;
    let bytes = options
        .output_codec()
        .encode(&doc)
        .map_err(SdkError::Encode)?;
    std::fs::write(dest, &bytes).map_err(|e| io_error(dest, e))?;

    info!(
        source = %source.display(),
        dest = %dest.display(),
        bytes = bytes.len(),
        "merged document"
    );
    Ok(doc)
}

fn source_format(path: &Path) -> Format {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .unwrap_or_default()
}

fn io_error(path: &Path, source: std::io::Error) -> SdkError {
    SdkError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use specsplit_types::{EntityKind, FunctionSpec, ResourceSpec, TypeSpec};
    use std::collections::BTreeMap;

    const SCHEMA: &str = r#"{
        "name": "acme",
        "version": "0.1.0",
        "pluginDownloadURL": "https://example.com/plugins",
        "language": {"nodejs": {"packageName": "@acme/sdk"}},
        "x-custom": true,
        "resources": {
            "acme:index:Bucket": {
                "description": "A bucket.\n\n## Example\n\nMake one.",
                "properties": {"arn": {"type": "string"}}
            }
        },
        "functions": {
            "acme:index:getBucket": {"description": "Look one up."}
        },
        "types": {
            "acme:index:Tag": {"type": "object"},
            "acme:index:tag": {"type": "string"}
        }
    }"#;

    fn write_schema(dir: &Path) -> PathBuf {
        let path = dir.join("schema.json");
        std::fs::write(&path, SCHEMA).unwrap();
        path
    }

    #[test]
    fn split_then_read_preserves_document() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_schema(dir.path());
        let tree = dir.path().join("out/split");

        let summary = split_file(&source, &tree, SplitOptions::default()).unwrap();
        assert_eq!(summary.count(EntityKind::Type), 2);
        assert_eq!(summary.sidecars, 1);

        let original: PackageSpec = serde_json::from_str(SCHEMA).unwrap();
        assert_eq!(read_document(&tree).unwrap(), original);
        assert_eq!(original.extra["x-custom"], json!(true));
    }

    #[test]
    fn merge_writes_two_space_json() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_schema(dir.path());
        let tree = dir.path().join("tree");
        split_file(&source, &tree, SplitOptions::default()).unwrap();

        let merged = dir.path().join("merged.json");
        merge(&tree, &merged, &MergeOptions::default()).unwrap();
        let text = std::fs::read_to_string(&merged).unwrap();
        assert!(text.starts_with("{\n  \""));

        let reparsed: PackageSpec = serde_json::from_str(&text).unwrap();
        let original: PackageSpec = serde_json::from_str(SCHEMA).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn compact_merge() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_schema(dir.path());
        let tree = dir.path().join("tree");
        split_file(&source, &tree, SplitOptions::default()).unwrap();

        let merged = dir.path().join("merged.json");
        let options = MergeOptions {
            compact: true,
            ..Default::default()
        };
        merge(&tree, &merged, &options).unwrap();
        let text = std::fs::read_to_string(&merged).unwrap();
        assert!(!text.contains("\n  "));
    }

    #[test]
    fn yaml_tree_merges_with_matching_format() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_schema(dir.path());
        let tree = dir.path().join("tree");
        split_file(&source, &tree, SplitOptions::with_format(Format::Yaml)).unwrap();
        assert!(tree.join("core.yaml").exists());

        let merged = dir.path().join("merged.json");
        let options = MergeOptions {
            format: Format::Yaml,
            ..Default::default()
        };
        let doc = merge(&tree, &merged, &options).unwrap();
        assert_eq!(doc.types.len(), 2);
    }

    #[test]
    fn yaml_source_is_detected_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("schema.yaml");
        std::fs::write(&source, "name: acme\ntypes:\n  acme:index:T:\n    type: object\n").unwrap();
        let tree = dir.path().join("tree");
        split_file(&source, &tree, SplitOptions::default()).unwrap();
        let doc = read_document(&tree).unwrap();
        assert_eq!(doc.name, "acme");
        assert!(doc.types.contains_key("acme:index:T"));
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = split_file(dir.path().join("nope.json"), dir.path(), SplitOptions::default())
            .unwrap_err();
        assert!(matches!(err, SdkError::Io { .. }));
    }

    #[test]
    fn malformed_source_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bad.json");
        std::fs::write(&source, "{not json").unwrap();
        let err = split_file(&source, dir.path().join("t"), SplitOptions::default()).unwrap_err();
        assert!(matches!(err, SdkError::Parse { .. }));
    }

    #[test]
    fn open_view_reads_single_entity() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_schema(dir.path());
        let tree = dir.path().join("tree");
        split_file(&source, &tree, SplitOptions::default()).unwrap();

        let view = open_view(&tree);
        let bucket = view.resource("acme:index:Bucket").unwrap().unwrap();
        assert_eq!(bucket.description, "A bucket.\n\n## Example\n\nMake one.");
        assert!(!view.index().is_loaded(EntityKind::Type));
    }

    // One package and flat modules: tokens that differ only in package or
    // submodule share a file path.
    fn token() -> impl Strategy<Value = String> {
        ("[a-z]{1,5}", "[A-Za-z][A-Za-z0-9]{0,8}")
            .prop_map(|(module, name)| format!("acme:{module}:{name}"))
    }

    fn description() -> impl Strategy<Value = String> {
        "[a-zA-Z .\n]{0,24}"
    }

    fn document() -> impl Strategy<Value = PackageSpec> {
        (
            "[a-z]{1,8}",
            prop::collection::btree_map(token(), description(), 0..6),
            prop::collection::btree_map(token(), description(), 0..6),
            prop::collection::btree_map(token(), description(), 0..6),
        )
            .prop_map(|(name, resources, functions, types)| PackageSpec {
                name,
                resources: resources
                    .into_iter()
                    .map(|(t, description)| {
                        (t, ResourceSpec { description, ..Default::default() })
                    })
                    .collect(),
                functions: functions
                    .into_iter()
                    .map(|(t, description)| {
                        (t, FunctionSpec { description, ..Default::default() })
                    })
                    .collect::<BTreeMap<_, _>>(),
                types: types
                    .into_iter()
                    .map(|(t, description)| (t, TypeSpec { description, ..Default::default() }))
                    .collect(),
                ..Default::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn write_then_read_is_identity(doc in document()) {
            let dir = tempfile::tempdir().unwrap();
            write_document(dir.path(), &doc, SplitOptions::default()).unwrap();
            let back = read_document(dir.path()).unwrap();
            prop_assert_eq!(back, doc);
        }
    }
}
