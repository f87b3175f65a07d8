//! Desired-state extraction from a package manifest.
//!
//! This is a projection, not a parser: three line shapes are recognized and
//! everything else (directives, comments, `tap`, Ruby syntax) is ignored.
//!
//! ```text
//! brew "git"                        → formula
//! cask "iterm2"                     → cask
//! mas "Xcode", id: 497799835        → app-store entry
//! ```
use regex::{Captures, Regex};
use std::cmp::Ordering;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::ManifestError;

static FORMULA: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"^\s*brew\s+"([^"]+)""#).ok());
static CASK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"^\s*cask\s+"([^"]+)""#).ok());
static MAS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"^\s*mas\s+"([^"]+)".*,\s*id:\s*([0-9]+)"#).ok());

/// A mobile app-store entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasApp {
    /// Numeric store id, as written in the manifest.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl MasApp {
    /// Order ids numerically: leading zeros ignored, then shorter is smaller.
    fn cmp_id(&self, other: &Self) -> Ordering {
        let a = self.id.trim_start_matches('0');
        let b = other.id.trim_start_matches('0');
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

/// Normalized target package state.
///
/// Formulae and casks are sorted and unique; app-store entries are sorted by
/// numeric id with no repeated id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Desired {
    /// Formula names.
    pub formulae: Vec<String>,
    /// Cask names.
    pub casks: Vec<String>,
    /// App-store entries.
    pub mas: Vec<MasApp>,
}

/// One recognized manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Record {
    Formula(String),
    Cask(String),
    Mas(MasApp),
}

fn captures<'h>(re: Option<&Regex>, line: &'h str) -> Option<Captures<'h>> {
    re?.captures(line)
}

fn group(caps: &Captures<'_>, index: usize) -> Option<String> {
    caps.get(index).map(|m| m.as_str().to_string())
}

/// Classify a line; the first matching shape wins (formula, cask, app).
fn classify(line: &str) -> Option<Record> {
    if let Some(caps) = captures((*FORMULA).as_ref(), line) {
        return group(&caps, 1).map(Record::Formula);
    }
    if let Some(caps) = captures((*CASK).as_ref(), line) {
        return group(&caps, 1).map(Record::Cask);
    }
    let caps = captures((*MAS).as_ref(), line)?;
    Some(Record::Mas(MasApp {
        id: group(&caps, 2)?,
        name: group(&caps, 1)?,
    }))
}

/// Project manifest text into a normalized [`Desired`].
#[must_use]
pub fn extract_from_str(content: &str) -> Desired {
    let mut desired = Desired::default();
    for record in content.lines().filter_map(classify) {
        match record {
            Record::Formula(name) => desired.formulae.push(name),
            Record::Cask(name) => desired.casks.push(name),
            Record::Mas(app) => desired.mas.push(app),
        }
    }

    desired.formulae.sort_unstable();
    desired.formulae.dedup();
    desired.casks.sort_unstable();
    desired.casks.dedup();
    // Stable sort keeps first-seen order among equal ids, so dedup keeps the first name.
    desired.mas.sort_by(MasApp::cmp_id);
    desired.mas.dedup_by(|b, a| a.cmp_id(b) == Ordering::Equal);
    desired
}

/// Read the manifest at `path` and extract its desired state.
///
/// # Errors
///
/// Returns [`ManifestError::Unreadable`] if the file cannot be read.
pub fn extract(path: &Path) -> Result<Desired, ManifestError> {
    let bytes = std::fs::read(path).map_err(|source| ManifestError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_from_str(&String::from_utf8_lossy(&bytes)))
}
