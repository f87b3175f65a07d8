//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{EntryStatus, Log, SummaryEntry};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Counts of each [`EntryStatus`] in a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    /// [`EntryStatus::Created`] entries.
    pub created: usize,
    /// [`EntryStatus::Updated`] entries.
    pub updated: usize,
    /// [`EntryStatus::Unchanged`] entries.
    pub unchanged: usize,
    /// [`EntryStatus::DryRun`] entries.
    pub dry_run: usize,
    /// [`EntryStatus::Failed`] entries.
    pub failed: usize,
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Every message also reaches `$XDG_CACHE_HOME/homesetup/<command>.log`
/// through the file layer installed by
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<SummaryEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// created by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<SummaryEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (console only when verbose, always in the file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record an outcome for the summary.
    pub fn record(&self, name: &str, status: EntryStatus) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(SummaryEntry {
                name: name.to_string(),
                status,
            });
        }
    }

    /// Tally recorded entries by status.
    #[must_use]
    pub fn counts(&self) -> SummaryCounts {
        let mut counts = SummaryCounts::default();
        for entry in self.entries() {
            match entry.status {
                EntryStatus::Created => counts.created += 1,
                EntryStatus::Updated => counts.updated += 1,
                EntryStatus::Unchanged => counts.unchanged += 1,
                EntryStatus::DryRun => counts.dry_run += 1,
                EntryStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }

    /// Print the summary of changed entries and the status totals.
    ///
    /// Unchanged entries are counted but not listed.
    #[allow(clippy::print_stdout)]
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        for entry in &entries {
            let (icon, color) = match entry.status {
                EntryStatus::Created => ("+", "\x1b[32m"),
                EntryStatus::Updated => ("~", "\x1b[36m"),
                EntryStatus::DryRun => ("?", "\x1b[37m"),
                EntryStatus::Failed => ("✗", "\x1b[31m"),
                EntryStatus::Unchanged => continue,
            };
            self.info(&format!("{color}{icon} {}\x1b[0m", entry.name));
        }

        let c = self.counts();
        self.info(&format!(
            "{} files: \x1b[32m{} created\x1b[0m, \x1b[36m{} updated\x1b[0m, \x1b[2m{} unchanged\x1b[0m, \x1b[37m{} dry-run\x1b[0m, \x1b[31m{} failed\x1b[0m",
            entries.len(),
            c.created,
            c.updated,
            c.unchanged,
            c.dry_run,
            c.failed,
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record(&self, name: &str, status: EntryStatus) {
        self.record(name, status);
    }
}
