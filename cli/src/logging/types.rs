//! Core logging types: summary entries, their status, and the [`Log`] trait.

/// One reconciled path (or other unit of work) for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Path or name of the unit.
    pub name: String,
    /// Outcome.
    pub status: EntryStatus,
}

/// Outcome of one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// A missing file was written.
    Created,
    /// An existing file was replaced.
    Updated,
    /// The file already matched.
    Unchanged,
    /// A change was reported but not made.
    DryRun,
    /// The unit could not be completed.
    Failed,
}

/// Abstraction over logging backends.
///
/// Command code logs through this trait so a recording double can stand in
/// for [`Logger`](super::logger::Logger) in tests.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an outcome for the summary.
    fn record(&self, name: &str, status: EntryStatus);
}
