//! Error types for the fixture import pipeline.
//!
//! This module defines the error types used throughout the data-fixtures crate.

use thiserror::Error;

/// Errors that can occur while loading, ordering, or executing fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// A fixture directory could not be scanned.
	#[error("Fixture discovery failed for {path}: {reason}")]
	Discovery {
		/// Path that failed to scan.
		path: String,
		/// Why the scan failed.
		reason: String,
	},

	/// A fixture file or directory does not exist.
	#[error("Cannot find fixture file or directory: {0}")]
	NotFound(String),

	/// A fixture file registers zero or more than one fixture.
	#[error("Fixture file {path} must register exactly one fixture, found {found}")]
	AmbiguousFixture {
		/// Path of the offending file.
		path: String,
		/// Number of fixtures registered by that file.
		found: usize,
	},

	/// Declared dependencies form a cycle.
	#[error("Cyclic dependency detected: {cycle}")]
	CyclicDependency {
		/// Human-readable cycle, e.g. `a -> b -> a`.
		cycle: String,
	},

	/// A fixture depends on a fixture that was never added to the set.
	#[error("Fixture {fixture} depends on {dependency}, which was never added")]
	UnresolvedDependency {
		/// The dependent fixture.
		fixture: String,
		/// The missing dependency.
		dependency: String,
	},

	/// A specific fixture's load call failed.
	#[error("Fixture {fixture} failed to load: {source}")]
	FixtureLoad {
		/// The fixture whose load failed.
		fixture: String,
		/// The underlying failure.
		#[source]
		source: Box<FixtureError>,
	},

	/// Database operation failed outside a fixture's load call.
	#[error("Database error: {0}")]
	Database(String),

	/// A purge was required but no purger was supplied to the executor.
	#[error("Purge requested but no purger is configured")]
	PurgerNotConfigured,

	/// A fixture looked up a shared reference that was never stored.
	#[error("Unknown fixture reference: {0}")]
	UnknownReference(String),

	/// Configuration could not be read or parsed.
	#[error("Configuration error: {0}")]
	Config(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl FixtureError {
	/// Wraps an error as the load failure of a named fixture.
	pub fn during_load(fixture: impl Into<String>, source: FixtureError) -> Self {
		FixtureError::FixtureLoad {
			fixture: fixture.into(),
			source: Box::new(source),
		}
	}
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
