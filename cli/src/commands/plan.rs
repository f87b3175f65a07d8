//! Command: show what `apply` would change.
use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::config::file_specs;
use crate::logging::{EntryStatus, Log, Logger};
use crate::reconcile::{self, FileAction, Plan};

/// Run the `plan` command.
///
/// # Errors
///
/// Returns an error if setup fails or a strict load rejects a document.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let plan = compute(&setup.config, log)?;
    report(&plan, log);
    log.print_summary();
    Ok(())
}

/// Load specifications and plan them against the filesystem.
///
/// Template fallbacks are logged as warnings.
///
/// # Errors
///
/// Returns an error only when a strict load rejects a document.
pub fn compute(config: &Config, log: &dyn Log) -> Result<Plan> {
    log.stage("Loading specifications");
    let specs = file_specs::load(&config.specs_dir, config.load_mode).with_context(|| {
        format!(
            "loading specifications from {}",
            config.specs_dir.display()
        )
    })?;
    log.info(&format!(
        "{} specification(s) from {}",
        specs.len(),
        config.specs_dir.display()
    ));

    log.stage("Planning files");
    let plan = reconcile::plan(&config.root, &specs, &config.profile.name);
    for failure in &plan.render_failures {
        log.warn(&format!(
            "{}: {}; using literal content",
            failure.path, failure.error
        ));
    }
    Ok(plan)
}

/// Log every entry as a pending change and record it for the summary.
pub fn report(plan: &Plan, log: &dyn Log) {
    for entry in &plan.files {
        if entry.action == FileAction::NoOp {
            log.debug(&format!("{}: {}", entry.action, entry.path));
            log.record(&entry.path, EntryStatus::Unchanged);
        } else {
            log.dry_run(&format!("would {} {}", entry.action, entry.path));
            log.record(&entry.path, EntryStatus::DryRun);
        }
    }
    if plan.is_converged() {
        log.info("already converged");
    }
}
