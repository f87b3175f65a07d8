//! Desired-vs-actual file reconciliation: compute a plan, then apply it.
//!
//! Planning is read-only and deterministic: one [`FilePlan`] per input
//! [`FileSpec`](crate::config::file_specs::FileSpec), in input order.
//! Applying touches only entries whose action is not [`FileAction::NoOp`], so
//! applying a plan and re-planning yields only no-ops.
mod apply;
mod plan;

pub use apply::{ApplySummary, apply, apply_with};
pub use plan::{FileAction, FilePlan, Plan, RenderFailure, plan, plan_with};
