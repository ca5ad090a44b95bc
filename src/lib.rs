//! # Pathsweep
//!
//! Test-support utilities for tracking filesystem paths created during a test
//! and removing them during teardown.
//!
//! A test registers every path it creates with a [`TrackedPaths`] instance
//! built in its setup phase; the teardown phase calls
//! [`cleanup`](TrackedPaths::cleanup) to delete them all in registration
//! order. Each test owns its own instance, so nothing leaks between tests
//! even under a parallel runner.
//!
//! ## Modules
//!
//! - `cleanup` - Tracked path registration and teardown sweeping

pub mod cleanup;

pub use cleanup::TrackedPaths;
