//! Compile-time fixture registration.
//!
//! Fixtures announce themselves with [`register_fixture!`], which records the
//! defining source file alongside a constructor in a distributed registry.
//! The loader resolves file and directory paths against this table instead of
//! inspecting global type state at runtime.

use std::path::{Component, Path};

use crate::fixture::FixtureInstance;

/// A fixture registered at compile time.
///
/// Uses a static source path captured at the registration site, so a
/// registration can be matched against the file that declares it.
pub struct FixtureRegistration {
	/// Source file containing the registration (`file!()` at the macro site).
	pub source_file: &'static str,
	/// Constructs a fresh instance of the registered fixture.
	pub construct: fn() -> FixtureInstance,
}

inventory::collect!(FixtureRegistration);

/// Registers a fixture type for path-based discovery.
///
/// The type must implement [`Fixture`](crate::Fixture) and [`Default`]; the
/// loader constructs it with no arguments. One file may carry several
/// registrations, but only files with exactly one can be loaded through
/// `load_from_file`.
///
/// # Example
///
/// ```rust,ignore
/// use data_fixtures::{register_fixture, Fixture};
///
/// #[derive(Default)]
/// struct UserFixture;
///
/// #[async_trait::async_trait]
/// impl Fixture for UserFixture {
///     async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
///         Ok(())
///     }
/// }
///
/// register_fixture!(UserFixture);
/// ```
#[macro_export]
macro_rules! register_fixture {
	($fixture:ty) => {
		$crate::inventory::submit! {
			$crate::FixtureRegistration {
				source_file: file!(),
				construct: || $crate::FixtureInstance::new(
					<$fixture as ::std::default::Default>::default(),
				),
			}
		}
	};
}

/// Returns all fixture registrations linked into the current binary.
pub fn registered_fixtures() -> Vec<&'static FixtureRegistration> {
	inventory::iter::<FixtureRegistration>().collect()
}

/// Returns the registrations whose source file refers to `path`.
///
/// Matching compares trailing path components, so absolute, relative, and
/// workspace-rooted spellings of the same file all resolve to the same
/// registrations.
pub fn registrations_matching(path: &Path) -> Vec<&'static FixtureRegistration> {
	inventory::iter::<FixtureRegistration>()
		.filter(|reg| source_matches(reg.source_file, path))
		.collect()
}

/// Compares a registration's source path against a user-supplied path.
pub(crate) fn source_matches(source_file: &str, path: &Path) -> bool {
	let registered: Vec<Component<'_>> = Path::new(source_file)
		.components()
		.filter(|c| !matches!(c, Component::CurDir))
		.collect();
	let given: Vec<Component<'_>> = path
		.components()
		.filter(|c| !matches!(c, Component::CurDir))
		.collect();

	if registered.is_empty() || given.is_empty() {
		return false;
	}

	let overlap = registered.len().min(given.len());
	registered[registered.len() - overlap..] == given[given.len() - overlap..]
}
