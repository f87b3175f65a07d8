use std::path::Path;

use super::plan::{FileAction, FilePlan};
use crate::error::ApplyError;
use crate::resources::{Resource, ResourceChange};

/// Counts of what an apply run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Files written that did not exist.
    pub created: usize,
    /// Files rewritten with new content.
    pub updated: usize,
    /// No-op entries left untouched.
    pub unchanged: usize,
}

impl ApplySummary {
    /// Total number of files written.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.created + self.updated
    }
}

/// Write every mutating plan entry under `root`.
///
/// # Errors
///
/// Stops at the first directory-creation or write failure.  Files written
/// earlier in the same run are left in place.
pub fn apply(root: &Path, plans: &[FilePlan]) -> Result<ApplySummary, ApplyError> {
    apply_with(root, plans, |_, _| {})
}

/// Like [`apply`], calling `on_change` after each entry is handled.
///
/// # Errors
///
/// See [`apply`].
pub fn apply_with(
    root: &Path,
    plans: &[FilePlan],
    mut on_change: impl FnMut(&FilePlan, ResourceChange),
) -> Result<ApplySummary, ApplyError> {
    let mut summary = ApplySummary::default();

    for entry in plans {
        let change = if entry.action.is_mutating() {
            let resource = entry.resource(root);
            tracing::debug!("{} {}", entry.action, resource.description());
            resource.apply()?
        } else {
            ResourceChange::AlreadyCorrect
        };
        match (entry.action, change) {
            (_, ResourceChange::AlreadyCorrect) => summary.unchanged += 1,
            (FileAction::Create, ResourceChange::Applied) => summary.created += 1,
            (_, ResourceChange::Applied) => summary.updated += 1,
        }
        on_change(entry, change);
    }

    Ok(summary)
}
