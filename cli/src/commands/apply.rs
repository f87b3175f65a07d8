//! Command: write every declared file that is missing or differs.
use anyhow::{Context as _, Result};

use super::CommandSetup;
use super::plan;
use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::lock::RunLock;
use crate::logging::{EntryStatus, Log, Logger};
use crate::reconcile::{self, ApplySummary, FileAction};
use crate::resources::ResourceChange;

/// Run the `apply` command.
///
/// With `--dry-run` this reports like `plan` and takes no lock.
///
/// # Errors
///
/// Returns an error if setup fails, another run holds the lock, or a file
/// cannot be written.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    if global.dry_run {
        let plan = plan::compute(&setup.config, log)?;
        plan::report(&plan, log);
        log.print_summary();
        return Ok(());
    }

    let _lock = RunLock::acquire(&setup.config.root, "apply")?;
    let result = execute(&setup.config, log);
    log.print_summary();
    result.map(|_| ())
}

/// Plan and apply under `config`, logging and recording each entry.
///
/// # Errors
///
/// Returns an error on a strict load failure or the first write failure.
pub fn execute(config: &Config, log: &dyn Log) -> Result<ApplySummary> {
    let plan = plan::compute(config, log)?;

    log.stage("Applying files");
    let summary = reconcile::apply_with(&config.root, &plan.files, |entry, change| {
        let status = match (entry.action, change) {
            (_, ResourceChange::AlreadyCorrect) => EntryStatus::Unchanged,
            (FileAction::Create, ResourceChange::Applied) => EntryStatus::Created,
            (_, ResourceChange::Applied) => EntryStatus::Updated,
        };
        if status != EntryStatus::Unchanged {
            log.info(&format!("{}d {}", entry.action, entry.path));
        }
        log.record(&entry.path, status);
    })
    .context("applying files")?;

    log.info(&format!(
        "{} written, {} unchanged",
        summary.written(),
        summary.unchanged
    ));
    Ok(summary)
}
