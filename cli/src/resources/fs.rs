//! File-system resource helpers.
use std::path::{Component, Path, PathBuf};

use crate::error::ApplyError;

/// Resolve a specification path beneath `root`.
///
/// Root and drive prefixes are dropped and `..` never climbs above `root`,
/// so `/etc/passwd` maps to `root/etc/passwd` and `../x` to `root/x`.
#[must_use]
pub fn under_root(root: &Path, rel: impl AsRef<Path>) -> PathBuf {
    let mut out = root.to_path_buf();
    let mut depth = 0usize;
    for component in rel.as_ref().components() {
        match component {
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
            Component::ParentDir if depth > 0 => {
                out.pop();
                depth -= 1;
            }
            Component::ParentDir
            | Component::CurDir
            | Component::RootDir
            | Component::Prefix(_) => {}
        }
    }
    out
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns [`ApplyError::CreateDir`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ApplyError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ApplyError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Replace the content of `path` in full, creating the file if needed.
///
/// # Errors
///
/// Returns [`ApplyError::Write`] if the file cannot be written.
pub fn write_replacing(path: &Path, content: &[u8]) -> Result<(), ApplyError> {
    std::fs::write(path, content).map_err(|source| ApplyError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn under_root_keeps_relative_paths() {
        let root = Path::new("/r");
        assert_eq!(under_root(root, "a/b.txt"), Path::new("/r/a/b.txt"));
        assert_eq!(under_root(root, "./a/../b.txt"), Path::new("/r/b.txt"));
    }

    #[test]
    fn under_root_strips_absolute_prefix() {
        assert_eq!(
            under_root(Path::new("/r"), "/etc/passwd"),
            Path::new("/r/etc/passwd")
        );
    }

    #[test]
    fn under_root_never_climbs_above_root() {
        let root = Path::new("/r");
        assert_eq!(under_root(root, "../../x"), Path::new("/r/x"));
        assert_eq!(under_root(root, "a/../../x"), Path::new("/r/x"));
        assert_eq!(under_root(root, ".."), Path::new("/r"));
    }

    #[test]
    fn ensure_parent_dir_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("file.txt");
        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a").join("b").exists());
    }

    #[test]
    fn ensure_parent_dir_noop_when_parent_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        ensure_parent_dir(&file).unwrap();
        assert!(dir.path().exists());
    }

    #[test]
    fn ensure_parent_dir_noop_for_bare_file_name() {
        ensure_parent_dir(Path::new("file.txt")).unwrap();
    }

    #[test]
    fn ensure_parent_dir_reports_blocking_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blocker"), "x").unwrap();
        let target = dir.path().join("blocker").join("child.txt");
        let err = ensure_parent_dir(&target).unwrap_err();
        assert!(
            matches!(&err, ApplyError::CreateDir { path, .. } if path.ends_with("blocker")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn write_replacing_truncates_longer_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "a much longer original body").unwrap();
        write_replacing(&file, b"short").unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), b"short");
    }
}
