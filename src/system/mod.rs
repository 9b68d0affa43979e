//! System abstraction for environment, filesystem, process and network operations
//!
//! This module provides a unified trait for all external system interactions,
//! allowing for easy testing with mock implementations.

use core::time::Duration;
use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Temporary directory handle that cleans up on drop
///
/// For `RealSystem`, this wraps `tempfile::TempDir` and uses real filesystem.
/// For `MockSystem`, this manages an in-memory temporary directory.
///
/// Dropping the handle after the directory was already removed is a no-op.
pub trait TempDirHandle {
    /// Get the path to the temporary directory
    fn path(&self) -> &Path;
}

/// Captured result of a finished (or killed) subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was killed or terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// The process exceeded its timeout and was killed
    pub timed_out: bool,
}

impl ProcessOutput {
    /// Whether the process exited with status zero
    #[must_use]
    #[inline]
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }
}

/// Unified trait for system operations (environment + filesystem + processes + network)
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std`, `walkdir`, `tempfile` and `ureq`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    // ==================== Environment Operations ====================

    /// Get an environment variable
    fn env_var(&self, key: &str) -> Result<String, VarError>;

    /// The current user's home directory
    fn home_dir(&self) -> Option<PathBuf>;

    /// The per-user configuration directory
    fn config_dir(&self) -> Option<PathBuf>;

    // ==================== Filesystem Operations ====================

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write bytes to a file, creating it if it doesn't exist
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Recursively create a directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and all its contents
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Copy a file from source to destination
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Move a file to a new path
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path points to a file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path points to a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read directory entries (non-recursive), sorted by file name
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create a uniquely named temporary directory under the system temp root
    ///
    /// The directory name starts with `prefix` and is removed when the
    /// returned handle is dropped.
    fn create_temp_dir(&self, prefix: &str) -> io::Result<Box<dyn TempDirHandle>>;

    // ==================== Process Operations ====================

    /// Run a program to completion, capturing its output
    ///
    /// When `timeout` elapses the process is killed and the returned output
    /// has `timed_out` set. An `Err` means the process could not be started.
    fn execute(
        &self,
        program: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> io::Result<ProcessOutput>;

    // ==================== Network Operations ====================

    /// Perform a one-shot HTTP GET and return the response body
    fn http_get(&self, url: &str, timeout: Duration) -> io::Result<String>;
}
