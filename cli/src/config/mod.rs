//! Run configuration: repository settings, active profile, manifest location.
pub mod file_specs;
pub mod profiles;
pub mod toml_loader;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use file_specs::LoadMode;

/// Settings file at the repository root.
pub const SETTINGS_FILE: &str = "homesetup.toml";

/// Environment variable that redirects the base manifest.
pub const MANIFEST_ENV: &str = "HS_BREWFILE";

/// Repository-level settings read from [`SETTINGS_FILE`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding specification documents, relative to the root.
    pub specs_dir: PathBuf,
    /// Fail the whole load on any malformed specification document.
    pub strict: bool,
    /// Base package manifest, relative to the root.
    pub manifest: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            specs_dir: PathBuf::from("specs"),
            strict: false,
            manifest: PathBuf::from("Brewfile"),
        }
    }
}

/// All resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository root; spec paths and snapshot paths are relative to it.
    pub root: PathBuf,
    /// Active profile.
    pub profile: profiles::Profile,
    /// Absolute specifications directory.
    pub specs_dir: PathBuf,
    /// Absolute base manifest path (after the environment override).
    pub manifest: PathBuf,
    /// Loader mode for specification documents.
    pub load_mode: LoadMode,
}

impl Config {
    /// Load settings from `root` and combine them with the resolved profile.
    ///
    /// `strict_override` forces strict loading regardless of the settings file.
    /// `manifest_override` is the value of [`MANIFEST_ENV`], if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be parsed.
    pub fn load(
        root: &Path,
        profile: profiles::Profile,
        strict_override: bool,
        manifest_override: Option<&str>,
    ) -> Result<Self> {
        let settings: Settings = toml_loader::load_config(&root.join(SETTINGS_FILE))
            .with_context(|| format!("loading {SETTINGS_FILE}"))?;

        let manifest = manifest_override
            .filter(|m| !m.is_empty())
            .map_or_else(|| root.join(&settings.manifest), PathBuf::from);

        let load_mode = if strict_override || settings.strict {
            LoadMode::Strict
        } else {
            LoadMode::BestEffort
        };

        Ok(Self {
            root: root.to_path_buf(),
            profile,
            specs_dir: root.join(&settings.specs_dir),
            manifest,
            load_mode,
        })
    }
}
