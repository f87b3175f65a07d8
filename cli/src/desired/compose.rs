//! Manifest composition across profiles.
//!
//! A profile may add packages on top of the base manifest by providing
//! `config/profiles/<profile>/Brewfile.extra`.  When it does, the composed
//! manifest is the base bytes, a separator comment naming the profile, and the
//! extras bytes, written to `snapshots/logs/Brewfile.composed.<timestamp>`.
use std::path::{Path, PathBuf};

use super::format_timestamp;
use crate::error::ComposeError;

/// Directory receiving composed manifests, relative to the repository root.
pub const COMPOSED_DIR: &str = "snapshots/logs";

/// File name prefix of composed manifests.
pub const COMPOSED_PREFIX: &str = "Brewfile.composed.";

/// Path of the extras document for `profile`.
#[must_use]
pub fn extras_path(root: &Path, profile: &str) -> PathBuf {
    root.join("config")
        .join("profiles")
        .join(profile)
        .join("Brewfile.extra")
}

/// Separator written between the base manifest and the profile extras.
#[must_use]
pub fn separator(profile: &str) -> String {
    format!("\n# --- Profile: {profile} extras ---\n")
}

fn read(path: &Path) -> Result<Vec<u8>, ComposeError> {
    std::fs::read(path).map_err(|source| ComposeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Compose `base` with the extras of `profile`.
///
/// Returns `Ok(None)` when the profile has no extras document; the caller
/// should then use `base` unmodified.  That is a normal outcome, not a failure.
///
/// # Errors
///
/// - [`ComposeError::Read`] if the base manifest or the extras cannot be read
/// - [`ComposeError::Write`] if the composed manifest cannot be written
pub fn compose(
    root: &Path,
    base: &Path,
    profile: &str,
    timestamp: &chrono::NaiveDateTime,
) -> Result<Option<PathBuf>, ComposeError> {
    let extras = extras_path(root, profile);
    // Only a confirmed absence means "no extras"; anything else must be read.
    if matches!(extras.try_exists(), Ok(false)) {
        tracing::debug!("no extras for profile '{profile}' at {}", extras.display());
        return Ok(None);
    }

    let mut body = read(base)?;
    body.extend_from_slice(separator(profile).as_bytes());
    body.extend_from_slice(&read(&extras)?);

    let dir = root.join(COMPOSED_DIR);
    let out = dir.join(format!("{COMPOSED_PREFIX}{}", format_timestamp(timestamp)));
    std::fs::create_dir_all(&dir)
        .and_then(|()| std::fs::write(&out, &body))
        .map_err(|source| ComposeError::Write {
            path: out.clone(),
            source,
        })?;

    tracing::debug!("composed {} for profile '{profile}'", out.display());
    Ok(Some(out))
}

/// The manifest a run should consume: the composed one if any, else `base`.
///
/// # Errors
///
/// See [`compose`].
pub fn effective_manifest(
    root: &Path,
    base: &Path,
    profile: &str,
    timestamp: &chrono::NaiveDateTime,
) -> Result<PathBuf, ComposeError> {
    Ok(compose(root, base, profile, timestamp)?.unwrap_or_else(|| base.to_path_buf()))
}
