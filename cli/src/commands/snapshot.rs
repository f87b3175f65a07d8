//! Command: record the desired package state from the manifest.
use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::desired::{compose, manifest, snapshot};
use crate::lock::RunLock;
use crate::logging::{Log, Logger};

/// Run the `snapshot` command.
///
/// # Errors
///
/// Returns an error if another run holds the lock, or composition,
/// extraction, or the snapshot write fails.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let now = chrono::Local::now().naive_local();

    if global.dry_run {
        log.dry_run(&format!(
            "would snapshot {} for profile {}",
            setup.config.manifest.display(),
            setup.config.profile.name
        ));
        return Ok(());
    }

    let _lock = RunLock::acquire(&setup.config.root, "snapshot")?;
    let written = execute(&setup.config, &now, log)?;
    log.info(&format!("snapshot: {}", written.dir.display()));
    Ok(())
}

/// Compose, extract, and persist one snapshot taken at `now`.
///
/// # Errors
///
/// See [`run`].
pub fn execute(
    config: &Config,
    now: &chrono::NaiveDateTime,
    log: &dyn Log,
) -> Result<snapshot::Snapshot> {
    log.stage("Composing manifest");
    let manifest_path =
        compose::effective_manifest(&config.root, &config.manifest, &config.profile.name, now)
            .context("composing manifest")?;
    log.info(&format!("manifest: {}", manifest_path.display()));

    log.stage("Extracting desired state");
    let desired = manifest::extract(&manifest_path)?;
    log.info(&format!(
        "{} formulae, {} casks, {} app-store apps",
        desired.formulae.len(),
        desired.casks.len(),
        desired.mas.len()
    ));

    log.stage("Writing snapshot");
    let written = snapshot::write(&config.root, now, &desired)?;
    if !written.latest_updated {
        log.warn("latest pointer was not updated; list snapshot directories instead");
    }
    Ok(written)
}
