//! Fixture discovery from files, directories, and explicit registration.
//!
//! Discovery is resolved against the compile-time registration table: a
//! scanned `.rs` file contributes the fixtures that [`register_fixture!`]
//! recorded for it. Files without a registration are skipped with a warning,
//! never guessed at.
//!
//! [`register_fixture!`]: crate::register_fixture

use std::path::Path;

use crate::error::{FixtureError, FixtureResult};
use crate::fixture::{Fixture, FixtureId, FixtureInstance, FixtureSet};
use crate::registry;
use crate::resolver::DependencyResolver;

/// Collects fixtures and exposes them in dependency order.
///
/// # Example
///
/// ```ignore
/// let mut loader = FixtureLoader::new();
/// loader.load_from_directory("fixtures/catalog")?;
/// loader.add_fixture(AdminUserFixture::default());
///
/// for fixture in loader.fixtures()? {
///     fixture.load(&context).await?;
/// }
/// ```
#[derive(Debug, Default)]
pub struct FixtureLoader {
	set: FixtureSet,
}

impl FixtureLoader {
	/// Creates an empty loader.
	pub fn new() -> Self {
		Self::default()
	}

	/// Scans `path` recursively and adds every fixture registered for a
	/// discovered `.rs` file.
	///
	/// Files are visited in sorted path order so repeated runs discover
	/// fixtures deterministically. Files with no registration are skipped
	/// with a warning.
	///
	/// # Returns
	///
	/// The number of fixtures added; fixtures already present count as zero.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::Discovery`] if `path` does not exist, is not
	/// a directory, or cannot be read.
	pub fn load_from_directory<P: AsRef<Path>>(&mut self, path: P) -> FixtureResult<usize> {
		let path = path.as_ref();

		if !path.exists() {
			return Err(FixtureError::Discovery {
				path: path.display().to_string(),
				reason: "directory does not exist".to_string(),
			});
		}
		if !path.is_dir() {
			return Err(FixtureError::Discovery {
				path: path.display().to_string(),
				reason: "not a directory".to_string(),
			});
		}
		// Surface an unreadable root before walking; the walk itself skips
		// unreadable children
		std::fs::read_dir(path).map_err(|e| FixtureError::Discovery {
			path: path.display().to_string(),
			reason: e.to_string(),
		})?;

		let mut files = Vec::new();
		for entry in walkdir::WalkDir::new(path)
			.follow_links(true)
			.into_iter()
			.filter_map(|e| e.ok())
		{
			let entry_path = entry.path();

			if entry_path.extension().and_then(|s| s.to_str()) != Some("rs") {
				continue;
			}

			files.push(entry_path.to_path_buf());
		}

		// Sorted for deterministic discovery order
		files.sort();

		let mut added = 0;
		for file in &files {
			let registrations = registry::registrations_matching(file);
			if registrations.is_empty() {
				tracing::warn!(
					path = %file.display(),
					"Discovered file has no registered fixture. Fixture files must be \
					 compiled into the importing binary and call register_fixture!."
				);
				continue;
			}
			for registration in registrations {
				if self.add_instance((registration.construct)()) {
					added += 1;
				}
			}
		}

		tracing::debug!(path = %path.display(), added, "Loaded fixtures from directory");
		Ok(added)
	}

	/// Loads the single fixture registered for one source file.
	///
	/// # Returns
	///
	/// The identity of the file's fixture. Loading a file whose fixture is
	/// already present is a no-op and still returns the identity.
	///
	/// # Errors
	///
	/// - [`FixtureError::NotFound`] if `path` does not exist.
	/// - [`FixtureError::Discovery`] if `path` is a directory.
	/// - [`FixtureError::AmbiguousFixture`] if the file registers zero or
	///   more than one fixture.
	pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> FixtureResult<FixtureId> {
		let path = path.as_ref();

		if !path.exists() {
			return Err(FixtureError::NotFound(path.display().to_string()));
		}
		if path.is_dir() {
			return Err(FixtureError::Discovery {
				path: path.display().to_string(),
				reason: "expected a file, found a directory".to_string(),
			});
		}

		let registrations = registry::registrations_matching(path);
		match registrations.as_slice() {
			[registration] => {
				let instance = (registration.construct)();
				let id = instance.id();
				self.add_instance(instance);
				Ok(id)
			}
			_ => Err(FixtureError::AmbiguousFixture {
				path: path.display().to_string(),
				found: registrations.len(),
			}),
		}
	}

	/// Adds a fixture instance directly.
	///
	/// Returns `false` without replacing anything if a fixture of the same
	/// type is already present.
	pub fn add_fixture<F: Fixture>(&mut self, fixture: F) -> bool {
		self.add_instance(FixtureInstance::new(fixture))
	}

	fn add_instance(&mut self, instance: FixtureInstance) -> bool {
		let id = instance.id();
		let inserted = self.set.insert(instance);
		if !inserted {
			tracing::debug!(fixture = id.type_name(), "Fixture already present, skipping");
		}
		inserted
	}

	/// Returns whether a fixture of type `F` has been added.
	pub fn contains<F: Fixture>(&self) -> bool {
		self.set.contains(FixtureId::of::<F>())
	}

	/// Number of fixtures collected so far.
	pub fn len(&self) -> usize {
		self.set.len()
	}

	/// Returns whether no fixtures have been collected.
	pub fn is_empty(&self) -> bool {
		self.set.is_empty()
	}

	/// Returns the collected fixtures in dependency-resolved order.
	///
	/// # Errors
	///
	/// Propagates [`FixtureError::UnresolvedDependency`] and
	/// [`FixtureError::CyclicDependency`] from the resolver.
	pub fn fixtures(&self) -> FixtureResult<Vec<FixtureInstance>> {
		DependencyResolver::resolve(&self.set)
	}
}
