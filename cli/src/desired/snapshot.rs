//! Timestamped, persisted copies of a [`Desired`] value.
//!
//! ```text
//! snapshots/desired/
//! ├── 20260301-101500/
//! │   ├── desired_brew_formulae.txt
//! │   ├── desired_brew_casks.txt
//! │   └── desired_mas_apps.tsv
//! └── latest -> 20260301-101500
//! ```
//!
//! `latest` is replaced only after all three artifacts are written, and a
//! failure to replace it does not invalidate the snapshot.  Callers that need
//! certainty should use [`list_snapshots`] rather than trusting `latest`.
use std::io;
use std::path::{Path, PathBuf};

use super::format_timestamp;
use super::manifest::Desired;
use crate::error::SnapshotError;

/// Snapshot root relative to the repository root.
pub const SNAPSHOT_ROOT: &str = "snapshots/desired";
/// Name of the pointer to the newest snapshot.
pub const LATEST: &str = "latest";
/// Formula list artifact.
pub const FORMULAE_FILE: &str = "desired_brew_formulae.txt";
/// Cask list artifact.
pub const CASKS_FILE: &str = "desired_brew_casks.txt";
/// App-store table artifact.
pub const MAS_FILE: &str = "desired_mas_apps.tsv";

/// A written snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The snapshot directory.
    pub dir: PathBuf,
    /// Whether `latest` now points at [`dir`](Self::dir).
    pub latest_updated: bool,
}

/// Newline-joined list with a trailing newline.
fn render_list(items: &[String]) -> String {
    let mut out = items.join("\n");
    out.push('\n');
    out
}

/// One `id<TAB>name` row per app-store entry.
fn render_mas(desired: &Desired) -> String {
    desired
        .mas
        .iter()
        .map(|app| format!("{}\t{}\n", app.id, app.name))
        .collect()
}

/// Persist `desired` under `root/snapshots/desired/<timestamp>/`.
///
/// # Errors
///
/// Returns [`SnapshotError::Write`] if the directory or any artifact cannot be
/// written.  Artifacts written before the failure are left in place.
pub fn write(
    root: &Path,
    timestamp: &chrono::NaiveDateTime,
    desired: &Desired,
) -> Result<Snapshot, SnapshotError> {
    let base = root.join(SNAPSHOT_ROOT);
    let dir = base.join(format_timestamp(timestamp));
    std::fs::create_dir_all(&dir).map_err(|source| SnapshotError::Write {
        path: dir.clone(),
        source,
    })?;

    let artifacts = [
        (FORMULAE_FILE, render_list(&desired.formulae)),
        (CASKS_FILE, render_list(&desired.casks)),
        (MAS_FILE, render_mas(desired)),
    ];
    for (name, body) in artifacts {
        let path = dir.join(name);
        std::fs::write(&path, body).map_err(|source| SnapshotError::Write { path, source })?;
    }

    let latest_updated = match replace_latest(&base, &dir) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("snapshot written but '{LATEST}' was not updated: {e}");
            false
        }
    };

    Ok(Snapshot {
        dir,
        latest_updated,
    })
}

/// Point `base/latest` at `dir`, replacing any previous pointer atomically.
///
/// The new link is created under a temporary name and renamed over `latest`.
///
/// # Errors
///
/// Returns the I/O error from creating or renaming the link.
pub fn replace_latest(base: &Path, dir: &Path) -> io::Result<()> {
    let target = dir.file_name().map_or_else(|| dir.to_path_buf(), PathBuf::from);
    let staging = base.join(format!(".{LATEST}.{}", std::process::id()));
    let _ = std::fs::remove_file(&staging);

    create_pointer(&target, &staging)?;
    std::fs::rename(&staging, base.join(LATEST)).inspect_err(|_| {
        let _ = std::fs::remove_file(&staging);
    })
}

#[cfg(unix)]
fn create_pointer(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn create_pointer(target: &Path, link: &Path) -> io::Result<()> {
    std::fs::write(link, target.to_string_lossy().as_bytes())
}

/// All snapshot directories under `root`, oldest first.
///
/// Returns an empty list when no snapshot has been written.
///
/// # Errors
///
/// Returns an error if the snapshot root exists but cannot be read.
pub fn list_snapshots(root: &Path) -> io::Result<Vec<PathBuf>> {
    let base = root.join(SNAPSHOT_ROOT);
    if !base.exists() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(&base)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::desired::manifest::{MasApp, extract_from_str};

    fn ts(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn sample() -> Desired {
        extract_from_str(
            "brew \"git\"\nbrew \"bat\"\ncask \"iterm2\"\nmas \"Xcode\", id: 497799835\nmas \"Magnet\", id: 441258766\n",
        )
    }

    #[test]
    fn writes_three_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let snap = write(root.path(), &ts(10, 15, 0), &sample()).unwrap();
        assert_eq!(
            snap.dir,
            root.path().join("snapshots/desired/20260301-101500")
        );

        let formulae = std::fs::read_to_string(snap.dir.join(FORMULAE_FILE)).unwrap();
        insta::assert_snapshot!(formulae.trim_end(), @r"
        bat
        git
        ");
        let casks = std::fs::read_to_string(snap.dir.join(CASKS_FILE)).unwrap();
        assert_eq!(casks, "iterm2\n");
        let mas = std::fs::read_to_string(snap.dir.join(MAS_FILE)).unwrap();
        assert_eq!(mas, "441258766\tMagnet\n497799835\tXcode\n");
    }

    #[test]
    fn empty_desired_writes_empty_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let snap = write(root.path(), &ts(0, 0, 0), &Desired::default()).unwrap();
        assert_eq!(std::fs::read_to_string(snap.dir.join(FORMULAE_FILE)).unwrap(), "\n");
        assert_eq!(std::fs::read_to_string(snap.dir.join(MAS_FILE)).unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn latest_tracks_most_recent_write() {
        let root = tempfile::tempdir().unwrap();
        let first = write(root.path(), &ts(1, 0, 0), &sample()).unwrap();
        let second = write(root.path(), &ts(2, 0, 0), &Desired::default()).unwrap();
        assert!(first.latest_updated && second.latest_updated);

        let latest = root.path().join(SNAPSHOT_ROOT).join(LATEST);
        assert_eq!(
            std::fs::read_link(&latest).unwrap(),
            PathBuf::from("20260301-020000")
        );
        assert_eq!(
            std::fs::read_to_string(latest.join(FORMULAE_FILE)).unwrap(),
            "\n"
        );
    }

    #[test]
    fn latest_failure_does_not_fail_write() {
        let root = tempfile::tempdir().unwrap();
        // A non-empty directory named `latest` cannot be replaced by rename.
        let blocker = root.path().join(SNAPSHOT_ROOT).join(LATEST);
        std::fs::create_dir_all(blocker.join("keep")).unwrap();

        let snap = write(root.path(), &ts(3, 0, 0), &sample()).unwrap();
        assert!(!snap.latest_updated);
        assert!(snap.dir.join(MAS_FILE).exists());
    }

    #[test]
    fn artifact_write_failure_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(SNAPSHOT_ROOT).join("20260301-040000");
        // A directory where the formula file should go makes the write fail.
        std::fs::create_dir_all(dir.join(FORMULAE_FILE)).unwrap();
        let err = write(root.path(), &ts(4, 0, 0), &sample()).unwrap_err();
        assert!(
            matches!(&err, SnapshotError::Write { path, .. } if path.ends_with(FORMULAE_FILE)),
            "unexpected error: {err:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn list_snapshots_excludes_latest_pointer() {
        let root = tempfile::tempdir().unwrap();
        write(root.path(), &ts(5, 0, 0), &sample()).unwrap();
        write(root.path(), &ts(6, 0, 0), &sample()).unwrap();
        let dirs = list_snapshots(root.path()).unwrap();
        let names: Vec<String> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["20260301-050000", "20260301-060000"]);
    }

    #[test]
    fn list_snapshots_empty_without_root() {
        let root = tempfile::tempdir().unwrap();
        assert!(list_snapshots(root.path()).unwrap().is_empty());
    }

    #[test]
    fn mas_rows_follow_canonical_order() {
        let desired = Desired {
            mas: vec![
                MasApp {
                    id: "1".into(),
                    name: "One".into(),
                },
                MasApp {
                    id: "20".into(),
                    name: "Twenty".into(),
                },
            ],
            ..Desired::default()
        };
        assert_eq!(render_mas(&desired), "1\tOne\n20\tTwenty\n");
    }
}
