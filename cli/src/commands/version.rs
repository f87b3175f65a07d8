//! Command: print version information.

/// Version string baked in at build time, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("HOMESETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the homesetup version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("homesetup {}", version());
}
