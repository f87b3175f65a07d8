//! Command: install manifest packages with `brew bundle`.
use anyhow::{Context as _, Result, bail};

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::desired::compose;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};

/// Package manager program.
pub const BREW: &str = "brew";

/// Run the `brew` command.
///
/// # Errors
///
/// Returns an error if `brew` is not installed, composition fails, or
/// `brew bundle` exits non-zero.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let now = chrono::Local::now().naive_local();
    execute(&setup.config, &now, global.dry_run, &SystemExecutor, log)
}

/// Arguments passed to `brew` for `manifest`.
#[must_use]
pub fn bundle_args(manifest: &std::path::Path, dry_run: bool) -> Vec<String> {
    let mut args = vec!["bundle".to_string()];
    if dry_run {
        args.push("check".to_string());
    }
    args.push(format!("--file={}", manifest.display()));
    args
}

/// Compose the manifest and hand it to `brew bundle` through `executor`.
///
/// In dry-run mode `brew bundle check` reports what is missing instead.
///
/// # Errors
///
/// See [`run`].
pub fn execute(
    config: &Config,
    now: &chrono::NaiveDateTime,
    dry_run: bool,
    executor: &dyn Executor,
    log: &dyn Log,
) -> Result<()> {
    if !executor.which(BREW) {
        bail!("{BREW} not found on PATH");
    }

    log.stage("Composing manifest");
    let manifest =
        compose::effective_manifest(&config.root, &config.manifest, &config.profile.name, now)
            .context("composing manifest")?;
    log.info(&format!("manifest: {}", manifest.display()));

    let args = bundle_args(&manifest, dry_run);
    if dry_run {
        log.stage("Checking packages");
    } else {
        log.stage("Installing packages");
    }
    let result = executor
        .run(BREW, &args)
        .with_context(|| format!("{BREW} {}", args.join(" ")))?;
    for line in result.stdout.lines().filter(|l| !l.trim().is_empty()) {
        log.debug(line);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::profiles::{Profile, ProfileSource};
    use crate::exec::{ExecResult, MockExecutor};
    use crate::logging::EntryStatus;
    use std::path::Path;

    #[derive(Debug, Default)]
    struct NullLog;

    impl Log for NullLog {
        fn stage(&self, _: &str) {}
        fn info(&self, _: &str) {}
        fn debug(&self, _: &str) {}
        fn warn(&self, _: &str) {}
        fn error(&self, _: &str) {}
        fn dry_run(&self, _: &str) {}
        fn record(&self, _: &str, _: EntryStatus) {}
    }

    fn config(root: &Path, profile: &str) -> Config {
        std::fs::write(root.join("Brewfile"), "brew \"git\"\n").unwrap();
        Config::load(
            root,
            Profile {
                name: profile.to_string(),
                source: ProfileSource::Cli,
            },
            false,
            None,
        )
        .unwrap()
    }

    fn now() -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn bundle_args_for_install_and_check() {
        let path = Path::new("/r/Brewfile");
        assert_eq!(bundle_args(path, false), ["bundle", "--file=/r/Brewfile"]);
        assert_eq!(
            bundle_args(path, true),
            ["bundle", "check", "--file=/r/Brewfile"]
        );
    }

    #[test]
    fn missing_brew_is_error() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path(), "base");
        let mut exec = MockExecutor::new();
        exec.expect_which().returning(|_| false);
        exec.expect_run().never();
        let err = execute(&config, &now(), false, &exec, &NullLog).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn installs_base_manifest_without_extras() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path(), "base");
        let expected = format!("--file={}", root.path().join("Brewfile").display());
        let mut exec = MockExecutor::new();
        exec.expect_which().returning(|_| true);
        exec.expect_run()
            .withf(move |program, args| {
                program == BREW && args.len() == 2 && args[0] == "bundle" && args[1] == expected
            })
            .times(1)
            .returning(|_, _| Ok(ExecResult::default()));
        execute(&config, &now(), false, &exec, &NullLog).unwrap();
    }

    #[test]
    fn dry_run_checks_composed_manifest() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path(), "work");
        let extras = compose::extras_path(root.path(), "work");
        std::fs::create_dir_all(extras.parent().unwrap()).unwrap();
        std::fs::write(&extras, "cask \"slack\"\n").unwrap();

        let composed = root
            .path()
            .join("snapshots/logs/Brewfile.composed.20260301-080000");
        let expected = format!("--file={}", composed.display());
        let mut exec = MockExecutor::new();
        exec.expect_which().returning(|_| true);
        exec.expect_run()
            .withf(move |_, args| args.get(1).is_some_and(|a| a == "check") && args.last() == Some(&expected))
            .times(1)
            .returning(|_, _| Ok(ExecResult::default()));
        execute(&config, &now(), true, &exec, &NullLog).unwrap();
        assert!(composed.exists());
    }

    #[test]
    fn bundle_failure_propagates() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path(), "base");
        let mut exec = MockExecutor::new();
        exec.expect_which().returning(|_| true);
        exec.expect_run()
            .returning(|_, _| Err(anyhow::anyhow!("brew failed (exit 1)")));
        let err = execute(&config, &now(), false, &exec, &NullLog).unwrap_err();
        assert!(format!("{err:#}").contains("exit 1"));
    }
}
