//! Mock system implementation for testing

use tracing::error;

use super::{ProcessOutput, System, TempDirHandle};
use core::time::Duration;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

// Global counter for generating unique temp directory IDs
static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Root under which mock temporary directories are created
pub const MOCK_TEMP_ROOT: &str = "/tmp";

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides an in-memory filesystem and environment, a set of
/// fake remote repositories that `git clone` materializes into the clone
/// destination, and canned HTTP responses.
///
/// # Example
/// ```
/// use xcsnippets::system::{mock::MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_env("HOME", "/home/user").unwrap()
///     .with_file("/test/file.txt", b"Hello, world!").unwrap()
///     .with_dir("/test/subdir").unwrap();
///
/// assert_eq!(system.env_var("HOME").unwrap(), "/home/user");
/// assert!(system.exists(Path::new("/test/file.txt")));
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    env_vars: HashMap<String, String>,
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    /// Clone URL -> files (relative path, contents) present in that repository
    remotes: HashMap<String, Vec<(PathBuf, Vec<u8>)>>,
    http_responses: HashMap<String, String>,
    executed: Vec<Vec<String>>,
}

impl MockSystem {
    /// Create a new `MockSystem` with default state
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                env_vars: HashMap::new(),
                files: HashMap::new(),
                dirs: HashSet::from([PathBuf::from("/"), PathBuf::from(MOCK_TEMP_ROOT)]),
                remotes: HashMap::new(),
                http_responses: HashMap::new(),
                executed: Vec::new(),
            })),
        }
    }

    fn write_state(&self) -> io::Result<std::sync::RwLockWriteGuard<'_, MockSystemState>> {
        self.state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn read_state(&self) -> io::Result<std::sync::RwLockReadGuard<'_, MockSystemState>> {
        self.state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))
    }

    /// Set an environment variable (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_env(self, key: &str, value: &str) -> io::Result<Self> {
        let mut state = self.write_state()?;
        state.env_vars.insert(key.to_owned(), value.to_owned());
        drop(state);
        Ok(self)
    }

    /// Set `HOME` and create the directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_home<P: AsRef<Path>>(self, home: P) -> io::Result<Self> {
        let home = home.as_ref();
        self.with_env("HOME", &home.to_string_lossy())?.with_dir(home)
    }

    /// Add a file with contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self.write_state()?;

        if let Some(parent) = path_buf.parent() {
            Self::ensure_parent_dirs(&mut state.dirs, parent);
        }

        state.files.insert(path_buf, contents.to_vec());
        drop(state);
        Ok(self)
    }

    /// Add a directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self.write_state()?;
        Self::ensure_parent_dirs(&mut state.dirs, &path_buf);
        drop(state);
        Ok(self)
    }

    /// Register a remote repository that `git clone <url> <dest>` will reproduce
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_remote(self, url: &str, files: &[(&str, &[u8])]) -> io::Result<Self> {
        let mut state = self.write_state()?;
        state.remotes.insert(
            url.to_owned(),
            files
                .iter()
                .map(|(name, contents)| (PathBuf::from(name), contents.to_vec()))
                .collect(),
        );
        drop(state);
        Ok(self)
    }

    /// Register the body returned by an HTTP GET of `url`
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_http_response(self, url: &str, body: &str) -> io::Result<Self> {
        let mut state = self.write_state()?;
        state.http_responses.insert(url.to_owned(), body.to_owned());
        drop(state);
        Ok(self)
    }

    /// Every command passed to `execute`, program first
    #[must_use]
    #[inline]
    pub fn executed_commands(&self) -> Vec<Vec<String>> {
        self.read_state()
            .map(|state| state.executed.clone())
            .unwrap_or_default()
    }

    /// Directories directly under the mock temp root
    #[must_use]
    #[inline]
    pub fn temp_entries(&self) -> Vec<PathBuf> {
        self.read_dir(Path::new(MOCK_TEMP_ROOT)).unwrap_or_default()
    }

    #[inline]
    fn ensure_parent_dirs(dirs: &mut HashSet<PathBuf>, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn clone_remote(&self, args: &[String]) -> io::Result<ProcessOutput> {
        let (Some(destination), Some(url)) = (args.last(), args.iter().rev().nth(1)) else {
            return Ok(ProcessOutput {
                status: Some(129),
                stderr: "usage: git clone <repo> <dir>".to_owned(),
                ..ProcessOutput::default()
            });
        };

        let mut state = self.write_state()?;
        let Some(files) = state.remotes.get(url).cloned() else {
            return Ok(ProcessOutput {
                status: Some(128),
                stderr: format!("fatal: repository '{url}' not found"),
                ..ProcessOutput::default()
            });
        };

        let destination = PathBuf::from(destination);
        Self::ensure_parent_dirs(&mut state.dirs, &destination);
        Self::ensure_parent_dirs(&mut state.dirs, &destination.join(".git"));
        for (relative, contents) in files {
            let path = destination.join(relative);
            if let Some(parent) = path.parent() {
                Self::ensure_parent_dirs(&mut state.dirs, parent);
            }
            state.files.insert(path, contents);
        }
        drop(state);

        Ok(ProcessOutput {
            status: Some(0),
            ..ProcessOutput::default()
        })
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        let state = self.state.read().map_err(|_| VarError::NotPresent)?;
        state.env_vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[inline]
    fn home_dir(&self) -> Option<PathBuf> {
        self.env_var("HOME").ok().map(PathBuf::from)
    }

    #[inline]
    fn config_dir(&self) -> Option<PathBuf> {
        self.home_dir().map(|home| home.join(".config"))
    }

    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self.read_state()?;
        let bytes = state.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;
        drop(state);
        String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {e}")))
    }

    #[inline]
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.write_state()?;

        if let Some(parent) = path.parent()
            && !state.dirs.contains(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }

        state.files.insert(path.to_path_buf(), contents.to_vec());
        drop(state);
        Ok(())
    }

    #[inline]
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.write_state()?;
        if state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("A file exists at: {}", path.display()),
            ));
        }
        Self::ensure_parent_dirs(&mut state.dirs, path);
        drop(state);
        Ok(())
    }

    #[inline]
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.write_state()?;

        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        state.files.retain(|p, _| !p.starts_with(path));
        state.dirs.retain(|p| !p.starts_with(path));
        drop(state);
        Ok(())
    }

    #[inline]
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.write_state()?;

        if state.files.remove(path).is_none() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            ));
        }
        drop(state);
        Ok(())
    }

    #[inline]
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let contents = {
            let state = self.read_state()?;
            state.files.get(from).cloned().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Source file not found: {}", from.display()),
                )
            })?
        };

        let size = u64::try_from(contents.len()).map_err(io::Error::other)?;
        self.write(to, &contents)?;
        Ok(size)
    }

    #[inline]
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.write_state()?;

        if let Some(parent) = to.parent()
            && !state.dirs.contains(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }

        let contents = state.files.remove(from).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", from.display()),
            )
        })?;
        state.files.insert(to.to_path_buf(), contents);
        drop(state);
        Ok(())
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        self.read_state()
            .is_ok_and(|state| state.files.contains_key(path) || state.dirs.contains(path))
    }

    #[inline]
    fn is_file(&self, path: &Path) -> bool {
        self.read_state()
            .is_ok_and(|state| state.files.contains_key(path))
    }

    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        self.read_state()
            .is_ok_and(|state| state.dirs.contains(path))
    }

    #[inline]
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.read_state()?;

        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        // Direct children only, ordered like `RealSystem::read_dir`
        let entries: BTreeSet<PathBuf> = state
            .files
            .keys()
            .chain(state.dirs.iter())
            .filter(|child| child.parent() == Some(path) && child.as_path() != path)
            .cloned()
            .collect();
        drop(state);

        Ok(entries.into_iter().collect())
    }

    #[inline]
    fn create_temp_dir(&self, prefix: &str) -> io::Result<Box<dyn TempDirHandle>> {
        let id = TEMP_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_path = Path::new(MOCK_TEMP_ROOT).join(format!("{prefix}{id:08x}"));

        self.create_dir_all(&temp_path)?;

        Ok(Box::new(MockTempDir {
            path: temp_path,
            system: self.clone(),
        }))
    }

    #[inline]
    fn execute(
        &self,
        program: &str,
        args: &[String],
        _timeout: Option<Duration>,
    ) -> io::Result<ProcessOutput> {
        let mut command = vec![program.to_owned()];
        command.extend(args.iter().cloned());
        self.write_state()?.executed.push(command);

        if program == "git" && args.first().is_some_and(|arg| arg == "clone") {
            return self.clone_remote(args);
        }

        Ok(ProcessOutput {
            status: Some(0),
            ..ProcessOutput::default()
        })
    }

    #[inline]
    fn http_get(&self, url: &str, _timeout: Duration) -> io::Result<String> {
        let state = self.read_state()?;
        state.http_responses.get(url).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("http status: 404 for {url}"),
            )
        })
    }
}

/// Mock temporary directory handle that cleans up on drop
#[non_exhaustive]
pub struct MockTempDir {
    path: PathBuf,
    system: MockSystem,
}

impl TempDirHandle for MockTempDir {
    #[inline]
    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for MockTempDir {
    #[inline]
    fn drop(&mut self) {
        // Already gone is fine, anything else is worth a log line
        if !self.system.exists(&self.path) {
            return;
        }
        if let Err(e) = self.system.remove_dir_all(&self.path) {
            error!("Failed to remove temporary directory: {e}");
        }
    }
}
