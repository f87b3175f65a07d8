//! Declarative workstation reconciliation engine.
//!
//! Reconciles a desired state declared in specification documents and a
//! package manifest against the actual state of the filesystem.  Two
//! independent paths share no runtime state:
//!
//! - **file state**: [`config::file_specs`] loads specifications,
//!   [`templates`] renders content, and [`reconcile`] plans and applies
//!   per-path create/update/no-op actions
//! - **package state**: [`desired`] composes the manifest with profile
//!   extras, extracts the desired package sets, and persists snapshots
//!
//! [`commands`] wires both paths to the `homesetup` binary.
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod desired;
pub mod error;
pub mod exec;
pub mod lock;
pub mod logging;
pub mod reconcile;
pub mod resources;
pub mod templates;
