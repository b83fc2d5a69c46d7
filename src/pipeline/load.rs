//! File loading: lock, read and wrap each validated path.
//!
//! ## Concurrency
//!
//! [`load_files`] creates one load future per path and drives them all with
//! `join_all`, so every load is in flight before any result is inspected.
//! The default [`LockingFileLoader`] moves the blocking lock/read onto
//! tokio's blocking pool, one task per file, which gives real parallelism
//! for N files without a fixed pool size.
//!
//! Failures do not cancel siblings: every load runs to completion, then the
//! first error in input order is returned and all loaded bytes are dropped.
//!
//! ## Locking
//!
//! Each file is held under a non-blocking exclusive `flock` for the duration
//! of the read. [`FileLock`] releases it on drop, so the lock cannot leak on
//! an early return or a failed read. On non-Unix targets the guard is a
//! plain open handle.

use crate::error::AnyparserError;
use crate::options::UploadedFile;
use futures::future::join_all;
use std::fs::File;
use std::future::Future;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Produces an [`UploadedFile`] for a single validated path.
///
/// The seam exists so the fan-out in [`load_files`] can be driven by test
/// doubles as well as by [`LockingFileLoader`].
pub trait FileLoader: Send + Sync {
    fn load(&self, path: &Path) -> impl Future<Output = Result<UploadedFile, AnyparserError>> + Send;
}

/// Default loader: exclusive advisory lock, full read, release.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockingFileLoader;

impl FileLoader for LockingFileLoader {
    async fn load(&self, path: &Path) -> Result<UploadedFile, AnyparserError> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || read_locked(&path))
            .await
            .map_err(|e| AnyparserError::Internal(format!("file load task failed: {e}")))?
    }
}

/// Load every path concurrently; all-or-nothing.
pub async fn load_files<L: FileLoader>(
    loader: &L,
    paths: &[PathBuf],
) -> Result<Vec<UploadedFile>, AnyparserError> {
    let results = join_all(paths.iter().map(|p| loader.load(p))).await;

    let files = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let total: usize = files.iter().map(|f| f.contents.len()).sum();
    info!("Loaded {} file(s), {} bytes", files.len(), total);
    Ok(files)
}

/// Lock `path`, read it whole and wrap it with its basename.
pub fn read_locked(path: &Path) -> Result<UploadedFile, AnyparserError> {
    let mut lock = FileLock::acquire(path)?;

    let mut contents = Vec::new();
    lock.file_mut()
        .read_to_end(&mut contents)
        .map_err(|source| AnyparserError::FileReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    debug!("Read {} bytes from {}", contents.len(), path.display());
    Ok(UploadedFile { filename, contents })
}

/// An open file held under an exclusive advisory lock until dropped.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Open `path` and take a non-blocking exclusive lock on it.
    ///
    /// Returns [`AnyparserError::FileNotFound`] if the path vanished and
    /// [`AnyparserError::FileLocked`] if another holder has the lock.
    pub fn acquire(path: &Path) -> Result<Self, AnyparserError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AnyparserError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => AnyparserError::FileReadFailed {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        try_lock_exclusive(&file).map_err(|e| {
            if e.kind() == io::ErrorKind::WouldBlock {
                warn!("{} is locked by another process", path.display());
                AnyparserError::FileLocked {
                    path: path.to_path_buf(),
                }
            } else {
                AnyparserError::FileReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = unlock(&self.file) {
            warn!("Failed to release lock on {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        return Ok(());
    }
    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::EWOULDBLOCK) {
        Err(io::Error::new(io::ErrorKind::WouldBlock, err))
    } else {
        Err(err)
    }
}

#[cfg(unix)]
fn unlock(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_UN) };
    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock_exclusive(_file: &File) -> io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn unlock(_file: &File) -> io::Result<()> {
    Ok(())
}
