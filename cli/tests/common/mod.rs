// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed repository and a fluent builder so
// each integration test can set up an isolated environment without repeating
// filesystem boilerplate.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use homesetup_cli::config::Config;
use homesetup_cli::config::profiles::{Profile, ProfileSource};
use homesetup_cli::logging::{EntryStatus, Log};

/// An isolated test repository backed by a [`tempfile::TempDir`].
pub struct TestRepo {
    pub root: tempfile::TempDir,
}

impl TestRepo {
    /// Create an empty repository with a `specs/` directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("specs")).expect("create specs dir");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write `content` to `rel` under the root, creating parents.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        std::fs::write(&path, content).expect("write file");
        path
    }

    /// Write a specification document under `specs/`.
    pub fn with_spec(self, name: &str, content: &str) -> Self {
        self.write(&format!("specs/{name}"), content);
        self
    }

    /// Write the base manifest.
    pub fn with_manifest(self, content: &str) -> Self {
        self.write("Brewfile", content);
        self
    }

    /// Write the extras document for `profile`.
    pub fn with_extras(self, profile: &str, content: &str) -> Self {
        self.write(
            &format!("config/profiles/{profile}/Brewfile.extra"),
            content,
        );
        self
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).expect("read file")
    }

    /// Configuration for `profile` with default settings.
    pub fn config(&self, profile: &str) -> Config {
        Config::load(
            self.path(),
            Profile {
                name: profile.to_string(),
                source: ProfileSource::Cli,
            },
            false,
            None,
        )
        .expect("load config")
    }
}

/// A [`Log`] that keeps every message and summary record in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    pub messages: std::sync::Mutex<Vec<String>>,
    pub records: std::sync::Mutex<Vec<(String, EntryStatus)>>,
}

impl RecordingLog {
    fn push(&self, level: &str, msg: &str) {
        self.messages
            .lock()
            .expect("lock")
            .push(format!("{level}: {msg}"));
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock").clone()
    }

    pub fn records(&self) -> Vec<(String, EntryStatus)> {
        self.records.lock().expect("lock").clone()
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record(&self, name: &str, status: EntryStatus) {
        self.records
            .lock()
            .expect("lock")
            .push((name.to_string(), status));
    }
}
