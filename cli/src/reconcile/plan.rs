use std::fmt;
use std::path::Path;

use crate::config::file_specs::FileSpec;
use crate::error::TemplateError;
use crate::resources::file::ManagedFile;
use crate::resources::fs::under_root;
use crate::resources::{Resource, ResourceState};
use crate::templates::{self, RenderContext, Renderer};

/// Render-context key bound to the active profile.
pub const PROFILE_KEY: &str = "Profile";

/// Action required to bring one file to its desired content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileAction {
    /// The target does not exist (or cannot be read).
    Create,
    /// The target exists with different bytes.
    Update,
    /// The target already holds the desired bytes.
    NoOp,
}

impl FileAction {
    /// Whether applying this action writes to the filesystem.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

impl From<&ResourceState> for FileAction {
    fn from(state: &ResourceState) -> Self {
        match state {
            ResourceState::Missing => Self::Create,
            ResourceState::Incorrect { .. } => Self::Update,
            ResourceState::Correct => Self::NoOp,
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::NoOp => "no-op",
        })
    }
}

/// The resolved action for one specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    /// Target path relative to the repository root, as declared.
    pub path: String,
    /// Final content after template resolution.
    pub content: String,
    /// Action to take.
    pub action: FileAction,
}

impl FilePlan {
    /// The managed-file resource this plan entry targets under `root`.
    ///
    /// The path is confined to `root`; see [`under_root`].
    #[must_use]
    pub fn resource(&self, root: &Path) -> ManagedFile {
        ManagedFile::new(under_root(root, &self.path), self.content.clone())
    }
}

/// A template that failed to render; the literal content was used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    /// Specification path whose template failed.
    pub path: String,
    /// The render error.
    pub error: TemplateError,
}

/// Output of a planning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// One entry per input specification, in input order.
    pub files: Vec<FilePlan>,
    /// Templates that fell back to literal content.
    pub render_failures: Vec<RenderFailure>,
}

impl Plan {
    /// Number of entries with the given action.
    #[must_use]
    pub fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|p| p.action == action).count()
    }

    /// Whether every entry is a no-op.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.files.iter().all(|p| p.action == FileAction::NoOp)
    }
}

/// Plan `specs` against the filesystem under `root` using embedded templates.
#[must_use]
pub fn plan(root: &Path, specs: &[FileSpec], profile: &str) -> Plan {
    plan_with(templates::embedded_renderer(), root, specs, profile)
}

/// Plan `specs` against the filesystem under `root` using `renderer`.
///
/// Template failures never abort planning: the spec's literal content (or
/// the empty string) is used and the failure is reported in
/// [`Plan::render_failures`].
#[must_use]
pub fn plan_with(renderer: &Renderer, root: &Path, specs: &[FileSpec], profile: &str) -> Plan {
    let mut out = Plan::default();

    for spec in specs {
        let content = match resolve_content(renderer, spec, profile) {
            Ok(content) => content,
            Err(error) => {
                out.render_failures.push(RenderFailure {
                    path: spec.path.clone(),
                    error,
                });
                spec.content.clone().unwrap_or_default()
            }
        };

        let entry = FilePlan {
            path: spec.path.clone(),
            content,
            action: FileAction::NoOp,
        };
        let action = FileAction::from(&entry.resource(root).current_state());
        out.files.push(FilePlan { action, ..entry });
    }

    out
}

fn resolve_content(
    renderer: &Renderer,
    spec: &FileSpec,
    profile: &str,
) -> Result<String, TemplateError> {
    let Some(template) = &spec.template else {
        return Ok(spec.content.clone().unwrap_or_default());
    };
    let mut context: RenderContext = spec.data.clone();
    context.insert(PROFILE_KEY.to_string(), profile.to_string());
    renderer.render(template, &context)
}
