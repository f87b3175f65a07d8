//! File specification documents: declared desired files.
//!
//! A specification document is a `.json` or `.toml` file anywhere under the
//! specifications directory.  JSON documents hold either a bare array of
//! records or an object with a `files` array; TOML documents hold a `files`
//! array of tables.
//!
//! ```json
//! { "files": [
//!     { "path": ".zshrc", "template": "zshrc.tmpl", "data": { "Editor": "nvim" } },
//!     { "path": ".hushlogin", "content": "" }
//! ] }
//! ```
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::LoadError;

/// A declared desired file.
///
/// When `template` is set, its rendered output supersedes `content`; if
/// rendering fails the literal `content` (possibly empty) is used instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpec {
    /// Target path relative to the repository root.
    pub path: String,
    /// Literal file content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Name of an embedded template to render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Render context for `template`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl FileSpec {
    /// A literal-content spec.
    #[must_use]
    pub fn literal(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            content: Some(content.to_string()),
            ..Self::default()
        }
    }

    /// A template-backed spec.
    #[must_use]
    pub fn templated(path: &str, template: &str, data: &[(&str, &str)]) -> Self {
        Self {
            path: path.to_string(),
            template: Some(template.to_string()),
            data: data
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            ..Self::default()
        }
    }
}

/// How the loader treats documents it cannot read or parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Skip bad documents and keep walking.
    #[default]
    BestEffort,
    /// Fail the whole load on the first bad document.
    Strict,
}

/// Object shape wrapping the record list.
#[derive(Debug, Deserialize)]
struct Wrapped {
    files: Vec<FileSpec>,
}

/// Document formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse one document body.
fn parse_document(format: Format, content: &str) -> Result<Vec<FileSpec>, String> {
    match format {
        Format::Json => serde_json::from_str::<Vec<FileSpec>>(content).or_else(|array_err| {
            serde_json::from_str::<Wrapped>(content)
                .map(|w| w.files)
                .map_err(|object_err| {
                    format!("not a spec array ({array_err}) nor a files object ({object_err})")
                })
        }),
        Format::Toml => toml::from_str::<Wrapped>(content)
            .map(|w| w.files)
            .map_err(|e| e.to_string()),
    }
}

/// Load every file specification under `dir`.
///
/// Documents are visited depth-first with entries sorted by file name; the
/// result concatenates per-document lists in that order, each in document
/// order.  No deduplication or path normalization is performed.
///
/// # Errors
///
/// Only in [`LoadMode::Strict`]: returns a [`LoadError`] for the first
/// directory entry that cannot be walked, read, or parsed.  In
/// [`LoadMode::BestEffort`] such documents are skipped and this never fails.
pub fn load(dir: &Path, mode: LoadMode) -> Result<Vec<FileSpec>, LoadError> {
    let mut specs = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source
                    .path()
                    .map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
                if mode == LoadMode::Strict {
                    return Err(LoadError::Walk { path, source });
                }
                tracing::debug!("skipping unreadable entry {}: {source}", path.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(format) = Format::from_path(path) else {
            continue;
        };

        match read_document(path, format) {
            Ok(mut doc) => specs.append(&mut doc),
            Err(e) if mode == LoadMode::Strict => return Err(e),
            Err(e) => tracing::debug!("skipping specification: {e}"),
        }
    }

    Ok(specs)
}

fn read_document(path: &Path, format: Format) -> Result<Vec<FileSpec>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(format, &content).map_err(|message| LoadError::Malformed {
        path: PathBuf::from(path),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn paths(specs: &[FileSpec]) -> Vec<&str> {
        specs.iter().map(|s| s.path.as_str()).collect()
    }

    // -----------------------------------------------------------------------
    // Document shapes
    // -----------------------------------------------------------------------

    #[test]
    fn parses_bare_array() {
        let specs = parse_document(
            Format::Json,
            r#"[{"path":"a.txt","content":"hi"},{"path":"b.txt"}]"#,
        )
        .unwrap();
        assert_eq!(specs[0], FileSpec::literal("a.txt", "hi"));
        assert_eq!(specs[1].content, None);
    }

    #[test]
    fn parses_files_object() {
        let specs = parse_document(
            Format::Json,
            r#"{"files":[{"path":".zshrc","template":"zshrc.tmpl","data":{"Editor":"vi"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            specs,
            vec![FileSpec::templated(".zshrc", "zshrc.tmpl", &[("Editor", "vi")])]
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let specs =
            parse_document(Format::Json, r#"[{"path":"a","mode":"0644","content":"x"}]"#).unwrap();
        assert_eq!(specs, vec![FileSpec::literal("a", "x")]);
    }

    #[test]
    fn parses_toml_files_table() {
        let specs = parse_document(
            Format::Toml,
            "[[files]]\npath = \"a.txt\"\ncontent = \"hi\"\n\n[[files]]\npath = \"b.txt\"\ntemplate = \"t\"\n",
        )
        .unwrap();
        assert_eq!(paths(&specs), ["a.txt", "b.txt"]);
        assert_eq!(specs[1].template.as_deref(), Some("t"));
    }

    #[test]
    fn rejects_object_without_files() {
        assert!(parse_document(Format::Json, r#"{"other":[]}"#).is_err());
        assert!(parse_document(Format::Json, "null").is_err());
    }

    #[test]
    fn rejects_record_without_path() {
        assert!(parse_document(Format::Json, r#"[{"content":"x"}]"#).is_err());
    }

    // -----------------------------------------------------------------------
    // Directory walk
    // -----------------------------------------------------------------------

    #[test]
    fn concatenates_documents_in_sorted_walk_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", r#"[{"path":"b1"},{"path":"b2"}]"#);
        write(dir.path(), "a.json", r#"{"files":[{"path":"a1"}]}"#);
        write(dir.path(), "c/nested.json", r#"[{"path":"c1"}]"#);
        write(dir.path(), "d.toml", "[[files]]\npath = \"d1\"\n");

        let specs = load(dir.path(), LoadMode::BestEffort).unwrap();
        assert_eq!(paths(&specs), ["a1", "b1", "b2", "c1", "d1"]);
    }

    #[test]
    fn ignores_unrecognized_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.md", "# not a spec");
        write(dir.path(), "a.json", r#"[{"path":"a"}]"#);
        let specs = load(dir.path(), LoadMode::BestEffort).unwrap();
        assert_eq!(paths(&specs), ["a"]);
    }

    #[test]
    fn best_effort_skips_malformed_documents() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", r#"[{"path":"a"}]"#);
        write(dir.path(), "b.json", "{ this is not json");
        write(dir.path(), "c.json", r#"[{"path":"c"}]"#);
        let specs = load(dir.path(), LoadMode::BestEffort).unwrap();
        assert_eq!(paths(&specs), ["a", "c"]);
    }

    #[test]
    fn strict_fails_on_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", r#"[{"path":"a"}]"#);
        write(dir.path(), "b.json", "{ this is not json");
        let err = load(dir.path(), LoadMode::Strict).unwrap_err();
        assert!(
            matches!(&err, LoadError::Malformed { path, .. } if path.ends_with("b.json")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn missing_directory_is_empty_in_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let specs = load(&dir.path().join("absent"), LoadMode::BestEffort).unwrap();
        assert!(specs.is_empty());
    }

    #[test]
    fn missing_directory_fails_in_strict() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent"), LoadMode::Strict).unwrap_err();
        assert!(matches!(err, LoadError::Walk { .. }));
    }

    #[test]
    fn duplicate_paths_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.json",
            r#"[{"path":"x","content":"1"},{"path":"x","content":"2"}]"#,
        );
        let specs = load(dir.path(), LoadMode::BestEffort).unwrap();
        assert_eq!(specs.len(), 2);
    }
}
