//! Idempotent resource primitives (check + apply pattern).
pub mod file;
pub mod fs;

/// State of a resource relative to its desired state.
///
/// # Examples
///
/// ```
/// use homesetup_cli::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "12 bytes".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// assert_ne!(wrong, correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist or cannot be read.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// Short description of the current value.
        current: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
}

/// Unified interface for resources that can be checked and applied.
///
/// # Examples
///
/// ```ignore
/// // All resources follow the same check-then-apply pattern:
/// if resource.needs_change() {
///     resource.apply()?;
/// }
/// ```
pub trait Resource {
    /// Error raised by [`apply`](Self::apply).
    type Error;

    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    fn current_state(&self) -> ResourceState;

    /// Bring the resource to its desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be made.
    fn apply(&self) -> Result<ResourceChange, Self::Error>;

    /// Determine if the resource needs to be changed.
    fn needs_change(&self) -> bool {
        matches!(
            self.current_state(),
            ResourceState::Missing | ResourceState::Incorrect { .. }
        )
    }
}
