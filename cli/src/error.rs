//! Domain-specific error types for the reconciliation engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Engine modules return typed errors (e.g., [`TemplateError`],
//! [`SnapshotError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! HomesetupError
//! ├── Template(TemplateError) — template lookup, parsing, rendering
//! ├── Load(LoadError)         — strict-mode specification loading
//! ├── Apply(ApplyError)       — directory creation and file writes
//! ├── Manifest(ManifestError) — manifest could not be opened
//! ├── Snapshot(SnapshotError) — snapshot artifact writes
//! ├── Compose(ComposeError)   — composed manifest read/write
//! └── Lock(LockError)         — advisory run lock
//! ```
//!
//! Template failures are recoverable (planning falls back to literal
//! content); every other variant is fatal to the operation that raised it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the engine.
#[derive(Error, Debug)]
pub enum HomesetupError {
    /// Template lookup, parse, or render failure.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Specification loading failure (strict mode only).
    #[error("Specification error: {0}")]
    Load(#[from] LoadError),

    /// Plan application failure.
    #[error("Apply error: {0}")]
    Apply(#[from] ApplyError),

    /// Manifest extraction failure.
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Snapshot persistence failure.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Manifest composition failure.
    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),

    /// Advisory lock failure.
    #[error("Lock error: {0}")]
    Lock(#[from] LockError),
}

/// Errors raised by the template renderer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Neither `templates/<name>` nor `<name>` exists in the namespace.
    #[error("template not found: {name}")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// The template body is malformed.
    #[error("syntax error in template '{name}': {message}")]
    Syntax {
        /// Template name.
        name: String,
        /// Description of the problem, including its position when known.
        message: String,
    },

    /// The template parsed but could not be rendered against the context.
    #[error("cannot render template '{name}': {message}")]
    Execution {
        /// Template name.
        name: String,
        /// Description of the problem.
        message: String,
    },
}

/// Errors raised by the specification loader in strict mode.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The specifications directory (or an entry inside it) could not be walked.
    #[error("cannot read specification directory {path}: {source}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// A specification document could not be read.
    #[error("cannot read specification {path}: {source}")]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A specification document matched neither recognized shape.
    #[error("malformed specification {path}: {message}")]
    Malformed {
        /// Document path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors raised while applying a plan.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// The parent directory chain of a target could not be created.
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A target file could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors raised by the manifest desired-state extractor.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest could not be opened or read.
    #[error("manifest unreadable: {path}: {source}")]
    Unreadable {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors raised by the snapshot writer.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot directory or one of its artifacts could not be written.
    #[error("cannot write snapshot artifact {path}: {source}")]
    Write {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors raised by the manifest composer.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// The base manifest or the profile extras could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The composed manifest could not be written.
    #[error("cannot write composed manifest {path}: {source}")]
    Write {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors raised by the advisory run lock.
#[derive(Error, Debug)]
pub enum LockError {
    /// Another process holds the lock and its metadata could be read.
    #[error(
        "another homesetup run holds the lock: {command} (PID {pid}, started {started_at})\n\
         If no homesetup process is running, remove the lock file:\n  {lock_path}"
    )]
    Contention {
        /// Command recorded by the holder.
        command: String,
        /// Holder process id.
        pid: u32,
        /// Holder start time.
        started_at: String,
        /// Path of the lock file.
        lock_path: PathBuf,
    },

    /// Another process holds the lock but its metadata is unreadable.
    #[error(
        "another homesetup run holds the lock\n\
         If no homesetup process is running, remove the lock file:\n  {lock_path}"
    )]
    ContentionUnknown {
        /// Path of the lock file.
        lock_path: PathBuf,
    },

    /// The lock file could not be created, opened, or written.
    #[error("cannot open lock file {lock_path}: {source}")]
    Io {
        /// Path of the lock file.
        lock_path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
