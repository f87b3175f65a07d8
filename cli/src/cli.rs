//! Command-line surface.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the workstation reconciliation engine.
#[derive(Parser, Debug)]
#[command(
    name = "homesetup",
    about = "Declarative workstation reconciliation engine",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Profile to use (overrides HS_PROFILE from ~/.config/homesetup/profile.env)
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override repository root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,

    /// Fail on any malformed specification document instead of skipping it
    #[arg(long, global = true)]
    pub strict: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show what `apply` would change
    Plan,
    /// Write every declared file that is missing or differs
    Apply,
    /// Record the desired package state from the manifest
    Snapshot,
    /// Install manifest packages with `brew bundle`
    Brew,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file and the run lock.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Apply => "apply",
            Self::Snapshot => "snapshot",
            Self::Brew => "brew",
            Self::Version => "version",
        }
    }
}
