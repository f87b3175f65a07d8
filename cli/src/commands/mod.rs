//! Top-level subcommand orchestration.
pub mod apply;
pub mod brew;
pub mod plan;
pub mod snapshot;
pub mod version;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::profiles::{self, ProfileSource};
use crate::config::{Config, MANIFEST_ENV};
use crate::logging::Log;

/// Environment variable naming the repository root.
pub const ROOT_ENV: &str = "HOMESETUP_ROOT";

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Resolved configuration for this run.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the repository root and the profile, then load configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be determined or the settings file
    /// fails to parse.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let root = resolve_root(global.root.as_deref(), std::env::var_os(ROOT_ENV))?;
        log.debug(&format!("root: {}", root.display()));

        let home = profiles::home_dir();
        let profile = profiles::resolve(global.profile.as_deref(), home.as_deref());
        match &profile.source {
            ProfileSource::Cli => log.info(&format!("profile: {} (--profile)", profile.name)),
            ProfileSource::File(path) => log.info(&format!(
                "profile: {} ({})",
                profile.name,
                path.display()
            )),
            ProfileSource::Default => log.info(&format!("profile: {} (default)", profile.name)),
        }

        let manifest_override = std::env::var(MANIFEST_ENV).ok();
        let config = Config::load(&root, profile, global.strict, manifest_override.as_deref())?;
        log.debug(&format!("specs: {}", config.specs_dir.display()));
        log.debug(&format!("manifest: {}", config.manifest.display()));

        Ok(Self { config })
    }
}

/// Resolve the repository root: explicit `--root`, then `env_root`, then the
/// current directory.
///
/// # Errors
///
/// Returns an error if the current directory is needed and unavailable.
pub fn resolve_root(explicit: Option<&Path>, env_root: Option<OsString>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }
    if let Some(root) = env_root.filter(|r| !r.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    std::env::current_dir().context("cannot determine repository root; use --root or set HOMESETUP_ROOT")
}
