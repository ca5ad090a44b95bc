//! Tracked filesystem cleanup for test teardown
//!
//! Tests register the paths they create; teardown sweeps them away in
//! registration order. The fixture uses RAII as a backstop so paths are
//! still removed when a test panics before its teardown hook runs.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Tracks filesystem paths created during a test for removal at teardown.
///
/// Paths are deleted in registration order. Registering a path performs no
/// validation; a path that no longer exists at cleanup time is skipped
/// silently, so duplicate registrations are harmless. Directories are
/// removed together with their entire contents.
///
/// Each test must construct its own instance — the tracked sequence is owned
/// exclusively and never shared, so parallel test workers cannot interfere
/// with each other.
///
/// # Example
///
/// ```
/// use pathsweep::TrackedPaths;
///
/// # fn example() -> anyhow::Result<()> {
/// let arena = tempfile::TempDir::new()?;
/// let mut tracked = TrackedPaths::new();
///
/// let artifact = arena.path().join("artifact.txt");
/// std::fs::write(&artifact, "output under test")?;
/// tracked.register(&artifact);
///
/// tracked.cleanup()?;
/// assert!(!artifact.exists());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TrackedPaths {
    paths: Vec<PathBuf>,
}

impl TrackedPaths {
    /// Create a fresh tracker with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path for removal at teardown.
    ///
    /// The path is appended to the tracked sequence as-is; it does not need
    /// to exist yet, and the same path may be registered more than once.
    pub fn register(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Write a file and register it in one step.
    pub fn create_file(
        &mut self,
        path: impl Into<PathBuf>,
        contents: impl AsRef<[u8]>,
    ) -> Result<()> {
        let path = path.into();
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write test file {}", path.display()))?;
        self.register(path);
        Ok(())
    }

    /// Create a directory (and any missing parents) and register it.
    pub fn create_dir(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create test directory {}", path.display()))?;
        self.register(path);
        Ok(())
    }

    /// Number of currently tracked paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the tracked sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Remove every tracked path from the filesystem, in registration order.
    ///
    /// Files are unlinked directly; directories are removed recursively,
    /// children before parent. A tracked path that no longer exists is
    /// treated as already cleaned up. Any other filesystem error (permission
    /// denied, I/O failure) propagates immediately and aborts the remainder
    /// of the sweep — teardown failures should surface loudly rather than be
    /// masked.
    ///
    /// The tracked sequence is drained, so calling `cleanup` again is a safe
    /// no-op.
    pub fn cleanup(&mut self) -> Result<()> {
        for path in self.paths.drain(..) {
            remove_path(&path)
                .with_context(|| format!("Failed to remove tracked path {}", path.display()))?;
        }
        Ok(())
    }
}

impl Drop for TrackedPaths {
    fn drop(&mut self) {
        // Backstop for panicking tests; errors are intentionally ignored
        // here, explicit cleanup() is the loud path.
        for path in self.paths.drain(..) {
            let _ = remove_path(&path);
        }
    }
}

/// Remove a single path, tolerating it having already disappeared.
fn remove_path(path: &Path) -> Result<()> {
    // symlink_metadata so a symlink is inspected as a link, never followed.
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!("Tracked path {} already gone, skipping", path.display());
            return Ok(());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to inspect tracked path {}", path.display()))
        }
    };

    if metadata.is_dir() {
        remove_tree(path)
    } else {
        debug!("Removing tracked file {}", path.display());
        ignore_not_found(fs::remove_file(path))
            .with_context(|| format!("Failed to unlink {}", path.display()))
    }
}

/// Recursively remove a directory: children first, sub-directories by
/// recursion, then the emptied directory itself.
fn remove_tree(path: &Path) -> Result<()> {
    debug!("Removing tracked directory {}", path.display());

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list directory {}", path.display()))
        }
    };

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {}", path.display()))?;
        let child = entry.path();

        let metadata = match fs::symlink_metadata(&child) {
            Ok(metadata) => metadata,
            // Removed behind our back mid-iteration still counts as cleaned.
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to inspect {}", child.display()))
            }
        };

        if metadata.is_dir() {
            remove_tree(&child)?;
        } else {
            trace!("Removing {}", child.display());
            ignore_not_found(fs::remove_file(&child))
                .with_context(|| format!("Failed to unlink {}", child.display()))?;
        }
    }

    ignore_not_found(fs::remove_dir(path))
        .with_context(|| format!("Failed to remove directory {}", path.display()))
}

fn ignore_not_found(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
