//! Real system implementation using `std`, `walkdir`, `tempfile` and `ureq`

use super::{ProcessOutput, System, TempDirHandle};
use core::time::Duration;
use std::env::VarError;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// How often a running subprocess is polled for completion
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Production implementation of System trait
///
/// This implementation directly delegates to the standard library and the
/// ecosystem crates. It's a zero-cost abstraction that provides no overhead
/// in production.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// `tempfile::TempDir` behind the `TempDirHandle` trait
struct RealTempDir(TempDir);

impl TempDirHandle for RealTempDir {
    fn path(&self) -> &Path {
        self.0.path()
    }
}

impl System for RealSystem {
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| entry.map(walkdir::DirEntry::into_path).map_err(io::Error::from))
            .collect()
    }

    fn create_temp_dir(&self, prefix: &str) -> io::Result<Box<dyn TempDirHandle>> {
        let temp_dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        Ok(Box::new(RealTempDir(temp_dir)))
    }

    fn execute(
        &self,
        program: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> io::Result<ProcessOutput> {
        debug!("Executing: {program} {}", args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Pipes are drained on their own threads so a chatty child can't block on a full pipe
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        // A timeout too large to represent as an instant means no deadline
        let deadline = timeout.and_then(|limit| Instant::now().checked_add(limit));
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(ProcessOutput {
                    status: status.code(),
                    stdout: join_reader(stdout_reader),
                    stderr: join_reader(stderr_reader),
                    timed_out: false,
                });
            }

            if deadline.is_some_and(|limit| Instant::now() >= limit) {
                warn!("'{program}' exceeded its timeout, killing it");
                if let Err(err) = child.kill() {
                    warn!("Failed to kill '{program}': {err}");
                }
                child.wait()?;

                // Grandchildren may still hold the pipes open, so the readers are left detached
                return Ok(ProcessOutput {
                    status: None,
                    stdout: String::new(),
                    stderr: String::new(),
                    timed_out: true,
                });
            }

            thread::sleep(POLL_INTERVAL);
        }
    }

    fn http_get(&self, url: &str, timeout: Duration) -> io::Result<String> {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: ureq::Agent = config.into();

        let mut response = agent.get(url).call().map_err(io::Error::other)?;
        response
            .body_mut()
            .read_to_string()
            .map_err(io::Error::other)
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Err(err) = pipe.read_to_end(&mut buffer) {
            debug!("Failed to read subprocess output: {err}");
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

fn join_reader(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_dir_is_sorted_and_shallow() {
        let system = RealSystem::new();
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        system.write(&root.join("b.txt"), b"b").unwrap();
        system.write(&root.join("a.txt"), b"a").unwrap();
        system.create_dir_all(&root.join("nested")).unwrap();
        system.write(&root.join("nested/c.txt"), b"c").unwrap();

        let entries = system.read_dir(root).unwrap();
        assert_eq!(
            entries,
            vec![root.join("a.txt"), root.join("b.txt"), root.join("nested")]
        );
    }

    #[test]
    fn test_temp_dir_uses_prefix() {
        let system = RealSystem::new();
        let handle = system.create_temp_dir("TEMP_SNIPPETS").unwrap();
        let name = handle.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("TEMP_SNIPPETS"));
        assert!(handle.path().is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_captures_status_and_output() {
        let system = RealSystem::new();
        let args = vec!["-c".to_owned(), "echo hello; exit 3".to_owned()];
        let output = system.execute("sh", &args, None).unwrap();

        assert_eq!(output.status, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "hello");
        assert!(!output.timed_out);
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_kills_on_timeout() {
        let system = RealSystem::new();
        let args = vec!["5".to_owned()];
        let output = system
            .execute("sleep", &args, Some(Duration::from_millis(100)))
            .unwrap();

        assert!(output.timed_out);
        assert!(!output.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_with_unrepresentable_timeout_runs_to_completion() {
        let system = RealSystem::new();
        let output = system
            .execute("true", &[], Some(Duration::from_secs(u64::MAX)))
            .unwrap();

        assert!(output.success());
        assert!(!output.timed_out);
    }

    #[test]
    fn test_execute_missing_program_is_error() {
        let system = RealSystem::new();
        let result = system.execute("definitely-not-a-real-program-xcs", &[], None);
        assert!(result.is_err());
    }
}
