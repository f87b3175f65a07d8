//! Active profile resolution.
//!
//! The profile is resolved once per run: an explicit CLI value wins, then the
//! `HS_PROFILE` key of `~/.config/homesetup/profile.env`, then [`DEFAULT_PROFILE`].
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Profile used when nothing else selects one.
pub const DEFAULT_PROFILE: &str = "base";

/// Key read from the profile file.
pub const PROFILE_KEY: &str = "HS_PROFILE";

/// A resolved profile for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Profile identifier (e.g. `"base"`, `"work"`).
    pub name: String,
    /// Where the name came from.
    pub source: ProfileSource,
}

/// Origin of the resolved profile name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    /// Passed on the command line.
    Cli,
    /// Read from the given profile file.
    File(PathBuf),
    /// Nothing selected a profile.
    Default,
}

/// Path of the profile file under `home`.
#[must_use]
pub fn profile_file(home: &Path) -> PathBuf {
    home.join(".config").join("homesetup").join("profile.env")
}

/// Extract `HS_PROFILE` from `key=value` file content.
///
/// Blank lines and `#` comments are skipped; surrounding single or double
/// quotes are stripped from the value.  An empty value counts as unset and
/// scanning continues with later lines.
#[must_use]
pub fn parse_profile_env(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.strip_prefix(PROFILE_KEY)?.strip_prefix('='))
        .map(|value| value.trim_matches(|c| c == '"' || c == '\'').to_string())
        .find(|value| !value.is_empty())
}

/// Read the profile name from `path`, if the file exists and sets one.
///
/// A file that exists but cannot be read (or is not UTF-8) is logged and
/// treated as unset.
#[must_use]
pub fn read_profile_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_profile_env(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(
                "ignoring unreadable profile file {}: {e}; using '{DEFAULT_PROFILE}'",
                path.display()
            );
            None
        }
    }
}

/// Resolve the active profile.
///
/// `home` is the user's home directory; `None` skips the profile file.
#[must_use]
pub fn resolve(cli_profile: Option<&str>, home: Option<&Path>) -> Profile {
    if let Some(name) = cli_profile.filter(|n| !n.is_empty()) {
        return Profile {
            name: name.to_string(),
            source: ProfileSource::Cli,
        };
    }

    if let Some(home) = home {
        let path = profile_file(home);
        if let Some(name) = read_profile_file(&path) {
            return Profile {
                name,
                source: ProfileSource::File(path),
            };
        }
    }

    Profile {
        name: DEFAULT_PROFILE.to_string(),
        source: ProfileSource::Default,
    }
}

/// The user's home directory from `HOME` (or `USERPROFILE` on Windows).
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_profile(home: &Path, content: &str) {
        let path = profile_file(home);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn parse_plain_value() {
        assert_eq!(parse_profile_env("HS_PROFILE=work\n"), Some("work".into()));
    }

    #[test]
    fn parse_strips_quotes_and_whitespace() {
        assert_eq!(
            parse_profile_env("  HS_PROFILE=\"personal\"  \n"),
            Some("personal".into())
        );
        assert_eq!(parse_profile_env("HS_PROFILE='ci'"), Some("ci".into()));
    }

    #[test]
    fn parse_skips_comments_and_other_keys() {
        let content = "# HS_PROFILE=commented\nOTHER=1\nHS_PROFILE_X=no\nHS_PROFILE=real\n";
        assert_eq!(parse_profile_env(content), Some("real".into()));
    }

    #[test]
    fn parse_empty_value_is_unset() {
        assert_eq!(parse_profile_env("HS_PROFILE=\n"), None);
        assert_eq!(parse_profile_env("HS_PROFILE=\"\"\n"), None);
    }

    #[test]
    fn cli_value_wins() {
        let home = tempfile::tempdir().unwrap();
        write_profile(home.path(), "HS_PROFILE=work\n");
        let profile = resolve(Some("laptop"), Some(home.path()));
        assert_eq!(profile.name, "laptop");
        assert_eq!(profile.source, ProfileSource::Cli);
    }

    #[test]
    fn file_value_used_without_cli() {
        let home = tempfile::tempdir().unwrap();
        write_profile(home.path(), "HS_PROFILE=work\n");
        let profile = resolve(None, Some(home.path()));
        assert_eq!(profile.name, "work");
        assert_eq!(
            profile.source,
            ProfileSource::File(profile_file(home.path()))
        );
    }

    #[test]
    fn defaults_to_base_when_file_missing() {
        let home = tempfile::tempdir().unwrap();
        let profile = resolve(None, Some(home.path()));
        assert_eq!(profile.name, DEFAULT_PROFILE);
        assert_eq!(profile.source, ProfileSource::Default);
    }

    #[test]
    fn defaults_to_base_when_value_empty() {
        let home = tempfile::tempdir().unwrap();
        write_profile(home.path(), "HS_PROFILE=\n");
        assert_eq!(resolve(None, Some(home.path())).name, "base");
    }

    #[test]
    fn defaults_to_base_when_file_is_not_utf8() {
        let home = tempfile::tempdir().unwrap();
        let path = profile_file(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"HS_PROFILE=\xff\xfe\n").unwrap();
        let profile = resolve(None, Some(home.path()));
        assert_eq!(profile.name, DEFAULT_PROFILE);
        assert_eq!(profile.source, ProfileSource::Default);
    }

    #[test]
    fn defaults_to_base_when_file_is_unreadable() {
        let home = tempfile::tempdir().unwrap();
        // A directory where the profile file should be.
        std::fs::create_dir_all(profile_file(home.path())).unwrap();
        assert_eq!(read_profile_file(&profile_file(home.path())), None);
        assert_eq!(resolve(None, Some(home.path())).name, "base");
    }

    #[test]
    fn empty_cli_value_is_ignored() {
        let profile = resolve(Some(""), None);
        assert_eq!(profile.name, "base");
    }
}
