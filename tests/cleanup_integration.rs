//! End-to-end teardown scenarios for the tracked cleanup fixture

use anyhow::Result;
use pathsweep::TrackedPaths;
use std::fs;
use tempfile::TempDir;

/// Files registered individually and then again via their parent directory:
/// the duplicate coverage must not fail the sweep, and everything must be
/// gone afterwards.
#[test]
fn test_files_then_parent_directory_all_removed() -> Result<()> {
    let arena = TempDir::new()?;
    let dir = arena.path().join("t");
    fs::create_dir(&dir)?;
    let a = dir.join("a.txt");
    let b = dir.join("b.txt");
    fs::write(&a, "a")?;
    fs::write(&b, "b")?;

    let mut tracked = TrackedPaths::new();
    tracked.register(&a);
    tracked.register(&b);
    tracked.register(&dir);
    tracked.cleanup()?;

    assert!(!a.exists());
    assert!(!b.exists());
    assert!(!dir.exists());
    Ok(())
}

/// A realistic test lifecycle: fixtures created through the tracker itself,
/// mixed with paths created directly and registered afterwards.
#[test]
fn test_mixed_fixture_lifecycle() -> Result<()> {
    let arena = TempDir::new()?;
    let mut tracked = TrackedPaths::new();

    tracked.create_dir(arena.path().join("work/output"))?;
    tracked.create_file(arena.path().join("work/output/report.json"), "{}")?;

    let scratch = arena.path().join("scratch.log");
    fs::write(&scratch, "log lines")?;
    tracked.register(&scratch);

    // Something the test never registered must survive the sweep.
    let keep = arena.path().join("keep.txt");
    fs::write(&keep, "keep")?;

    tracked.cleanup()?;

    assert!(!arena.path().join("work/output").exists());
    assert!(!scratch.exists());
    assert!(keep.exists());
    Ok(())
}

/// Teardown must be idempotent even when a helper already deleted part of
/// the tracked state during the test body.
#[test]
fn test_cleanup_after_manual_deletion() -> Result<()> {
    let arena = TempDir::new()?;
    let mut tracked = TrackedPaths::new();

    let file = arena.path().join("ephemeral.txt");
    tracked.create_file(&file, "short-lived")?;
    fs::remove_file(&file)?;

    tracked.cleanup()?;
    Ok(())
}
