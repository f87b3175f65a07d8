//! Managed file resource: a path whose content must equal a given body.
use std::path::PathBuf;

use super::fs::{ensure_parent_dir, write_replacing};
use super::{Resource, ResourceChange, ResourceState};
use crate::error::ApplyError;

/// A file whose bytes must equal `content` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedFile {
    /// Absolute target path.
    pub target: PathBuf,
    /// Desired content.
    pub content: String,
}

impl ManagedFile {
    /// Create a new managed file resource.
    #[must_use]
    pub const fn new(target: PathBuf, content: String) -> Self {
        Self { target, content }
    }
}

impl Resource for ManagedFile {
    type Error = ApplyError;

    fn description(&self) -> String {
        self.target.display().to_string()
    }

    /// Compare current bytes with the desired content.
    ///
    /// A target that does not exist or cannot be read is [`ResourceState::Missing`].
    fn current_state(&self) -> ResourceState {
        match std::fs::read(&self.target) {
            Err(_) => ResourceState::Missing,
            Ok(current) if current == self.content.as_bytes() => ResourceState::Correct,
            Ok(current) => ResourceState::Incorrect {
                current: format!("{} bytes", current.len()),
            },
        }
    }

    fn apply(&self) -> Result<ResourceChange, ApplyError> {
        ensure_parent_dir(&self.target)?;
        write_replacing(&self.target, self.content.as_bytes())?;
        Ok(ResourceChange::Applied)
    }
}
