//! Advisory run lock serializing mutating commands on one repository.
//!
//! `apply` and `snapshot` hold an exclusive, non-blocking OS lock on
//! `snapshots/.lock` for their whole run.  The holder records its pid, command
//! and start time in the file so a contending run can say who is in the way.
//! The OS releases the lock when the handle is dropped or the process exits,
//! so a stale file left by a crashed run never blocks later runs.
use std::fs::{File, OpenOptions, TryLockError};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LockError;

/// Lock file path relative to the repository root.
pub const LOCK_FILE: &str = "snapshots/.lock";

/// Metadata written by the lock holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockMetadata {
    /// Holder process id.
    pub pid: u32,
    /// Command the holder is running.
    pub command: String,
    /// Local start time of the holder.
    pub started_at: String,
}

/// A held run lock.  Dropping it releases the lock.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Take the run lock for `root` on behalf of `command`.
    ///
    /// # Errors
    ///
    /// - [`LockError::Contention`] or [`LockError::ContentionUnknown`] if
    ///   another run holds the lock
    /// - [`LockError::Io`] if the lock file cannot be created or written
    pub fn acquire(root: &Path, command: &str) -> Result<Self, LockError> {
        let path = root.join(LOCK_FILE);
        let io_err = |source| LockError::Io {
            lock_path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(io_err)?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => return Err(contention(&path)),
            Err(TryLockError::Error(e)) => return Err(io_err(e)),
        }

        let metadata = LockMetadata {
            pid: std::process::id(),
            command: command.to_string(),
            started_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        write_metadata(&file, &metadata).map_err(io_err)?;
        tracing::debug!("acquired run lock {}", path.display());

        Ok(Self { file, path })
    }

    /// Path of the lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the metadata through the held handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold metadata.
    pub fn metadata(&self) -> io::Result<LockMetadata> {
        let mut file = &self.file;
        file.seek(SeekFrom::Start(0))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        serde_json::from_str(&contents).map_err(io::Error::other)
    }
}

fn write_metadata(file: &File, metadata: &LockMetadata) -> io::Result<()> {
    file.set_len(0)?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, metadata).map_err(io::Error::other)?;
    writer.flush()
}

fn contention(path: &Path) -> LockError {
    let metadata = std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| serde_json::from_str::<LockMetadata>(&contents).ok());
    match metadata {
        Some(m) => LockError::Contention {
            command: m.command,
            pid: m.pid,
            started_at: m.started_at,
            lock_path: path.to_path_buf(),
        },
        None => LockError::ContentionUnknown {
            lock_path: path.to_path_buf(),
        },
    }
}
