//! Verbatim document reads and atomic, locked writes
//!
//! Content crosses this boundary as raw bytes. Nothing here rewrites
//! `\r\n`, `\r` or `\n`, so a document keeps its line-ending convention
//! through a read-modify-write cycle.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::checksum::compute_file_checksum;
use crate::{Error, NormalizedPath, Result};

/// Tuning for [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying the advisory lock before giving up.
    pub lock_timeout: Duration,
    /// Flush the staged file to disk before the rename.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Read a whole document into memory exactly as stored.
pub fn read_document(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let bytes = fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    tracing::debug!(path = %path, bytes = bytes.len(), "read document");

    String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
        path: native_path,
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Write a document back, byte for byte.
pub fn write_document(
    path: &NormalizedPath,
    content: &str,
    config: RobustnessConfig,
) -> Result<()> {
    write_atomic(path, content.as_bytes(), config)
}

/// Write a document back only if it still has `expected_checksum`.
pub fn write_document_if(
    path: &NormalizedPath,
    content: &str,
    expected_checksum: &str,
    config: RobustnessConfig,
) -> Result<()> {
    write_atomic_if(path, content.as_bytes(), expected_checksum, config)
}

/// Write content atomically to a file with locking.
///
/// Holds an advisory lock on `<path>.lock` for the duration, stages the
/// bytes in a temp file in the same directory and renames it over the
/// target. The target's permissions are carried over to the new file.
/// The lock file is left in place afterwards.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    write_locked(path, content, None, config)
}

/// [`write_atomic`], but fails with [`Error::ChecksumMismatch`] unless the
/// file on disk still hashes to `expected_checksum`.
///
/// The comparison runs while the lock is held, so a writer that took the
/// lock first is always detected.
pub fn write_atomic_if(
    path: &NormalizedPath,
    content: &[u8],
    expected_checksum: &str,
    config: RobustnessConfig,
) -> Result<()> {
    write_locked(path, content, Some(expected_checksum), config)
}

fn write_locked(
    path: &NormalizedPath,
    content: &[u8],
    expected_checksum: Option<&str>,
    config: RobustnessConfig,
) -> Result<()> {
    // Every spelling of a path must contend for the same lock file.
    let path = &path.canonical();
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let lock_path = path.lock_path();
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;
    acquire_lock(&lock_file, path, config.lock_timeout)?;

    let result = verify_checksum(path, expected_checksum)
        .and_then(|()| stage_and_rename(path, content, config));

    // The lock file itself stays: unlinking it would let a waiter that
    // already opened it lock a different inode than the next writer.
    let _ = FileExt::unlock(&lock_file);

    if result.is_ok() {
        tracing::info!(path = %path, bytes = content.len(), "wrote document");
    }
    result
}

fn verify_checksum(path: &NormalizedPath, expected: Option<&str>) -> Result<()> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let actual = compute_file_checksum(path)?;
    if actual != expected {
        tracing::warn!(path = %path, %expected, %actual, "document changed since it was read");
        return Err(Error::ChecksumMismatch {
            path: path.to_native(),
            expected: expected.to_string(),
        });
    }
    Ok(())
}

fn acquire_lock(lock_file: &File, path: &NormalizedPath, timeout: Duration) -> Result<()> {
    let policy = ExponentialBackoff {
        initial_interval: Duration::from_millis(10),
        max_interval: Duration::from_millis(250),
        max_elapsed_time: Some(timeout),
        ..ExponentialBackoff::default()
    };

    backoff::retry(policy, || {
        lock_file.try_lock_exclusive().map_err(|e| {
            tracing::debug!(path = %path, error = %e, "lock busy, retrying");
            backoff::Error::transient(e)
        })
    })
    .map_err(|_| Error::LockFailed {
        path: path.to_native(),
    })
}

fn stage_and_rename(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();
    let temp_path = path.temp_sibling();

    let staged = (|| -> Result<()> {
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .write_all(content)
            .map_err(|e| Error::io(&temp_path, e))?;

        if config.enable_fsync {
            temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
        }

        if let Ok(metadata) = fs::metadata(&native_path) {
            fs::set_permissions(&temp_path, metadata.permissions())
                .map_err(|e| Error::io(&temp_path, e))?;
        }

        fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))
    })();

    if staged.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    staged
}
