//! Fixture trait, fixture identity, and the identity-keyed fixture set.
//!
//! A fixture is a unit of data-loading logic identified by its concrete Rust
//! type. Dependencies between fixtures are declared as identities, and the
//! resolver turns them into an execution order before any fixture runs.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::ExecutionContext;
use crate::error::FixtureResult;

/// Identity of a fixture: its concrete type.
///
/// Two fixtures are the same fixture exactly when their `TypeId`s are equal.
/// The type name is carried alongside for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureId {
	type_id: TypeId,
	type_name: &'static str,
}

impl FixtureId {
	/// Returns the identity of fixture type `F`.
	///
	/// # Example
	///
	/// ```ignore
	/// let id = FixtureId::of::<UserFixture>();
	/// assert_eq!(id.short_name(), "UserFixture");
	/// ```
	pub fn of<F: Fixture>() -> Self {
		Self {
			type_id: TypeId::of::<F>(),
			type_name: std::any::type_name::<F>(),
		}
	}

	/// Returns the fully qualified type name.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Returns the type name without its module path.
	pub fn short_name(&self) -> &'static str {
		self.type_name.rsplit("::").next().unwrap_or(self.type_name)
	}
}

impl fmt::Display for FixtureId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.short_name())
	}
}

/// A unit of data-loading logic.
///
/// Implementors insert their data through the shared [`ExecutionContext`] and
/// may declare other fixture types that must load first. Ordering and
/// dependency-awareness are one capability: a fixture with no dependencies
/// simply keeps the default empty list.
///
/// # Example
///
/// ```ignore
/// #[derive(Default)]
/// struct UserFixture;
///
/// #[async_trait]
/// impl Fixture for UserFixture {
///     async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
///         context
///             .insert("users")
///             .value("username", "admin")
///             .execute()
///             .await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Fixture: Send + Sync + 'static {
	/// Loads this fixture's data through the shared execution context.
	async fn load(&self, context: &ExecutionContext) -> FixtureResult<()>;

	/// Identities of fixtures that must execute before this one.
	///
	/// The order of the returned list is not significant; it is the
	/// resolver's job to produce the global execution order.
	fn dependencies(&self) -> Vec<FixtureId> {
		Vec::new()
	}
}

/// A fixture paired with its identity, as held by the loader and executor.
#[derive(Clone)]
pub struct FixtureInstance {
	id: FixtureId,
	fixture: Arc<dyn Fixture>,
}

impl FixtureInstance {
	/// Wraps a concrete fixture, capturing its identity.
	pub fn new<F: Fixture>(fixture: F) -> Self {
		Self {
			id: FixtureId::of::<F>(),
			fixture: Arc::new(fixture),
		}
	}

	/// Returns the fixture's identity.
	pub fn id(&self) -> FixtureId {
		self.id
	}

	/// Identities of fixtures that must execute before this one.
	pub fn dependencies(&self) -> Vec<FixtureId> {
		self.fixture.dependencies()
	}

	/// Loads the wrapped fixture's data.
	pub async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
		self.fixture.load(context).await
	}
}

impl fmt::Debug for FixtureInstance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FixtureInstance")
			.field("id", &self.id)
			.finish_non_exhaustive()
	}
}

/// Insertion-ordered collection of fixtures, unique per identity.
///
/// Insertion order is the discovery order; the resolver overrides it with the
/// dependency order before execution.
#[derive(Debug, Default)]
pub struct FixtureSet {
	fixtures: Vec<FixtureInstance>,
	seen: HashSet<FixtureId>,
}

impl FixtureSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a fixture instance.
	///
	/// Returns `false` without replacing anything if a fixture of the same
	/// identity is already present.
	pub fn insert(&mut self, instance: FixtureInstance) -> bool {
		if !self.seen.insert(instance.id()) {
			return false;
		}
		self.fixtures.push(instance);
		true
	}

	/// Returns whether a fixture of the given identity is present.
	pub fn contains(&self, id: FixtureId) -> bool {
		self.seen.contains(&id)
	}

	/// Number of fixtures in the set.
	pub fn len(&self) -> usize {
		self.fixtures.len()
	}

	/// Returns whether the set is empty.
	pub fn is_empty(&self) -> bool {
		self.fixtures.is_empty()
	}

	/// Iterates fixtures in discovery order.
	pub fn iter(&self) -> impl Iterator<Item = &FixtureInstance> {
		self.fixtures.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Default)]
	struct AlphaFixture;

	#[async_trait]
	impl Fixture for AlphaFixture {
		async fn load(&self, _context: &ExecutionContext) -> FixtureResult<()> {
			Ok(())
		}
	}

	#[derive(Default)]
	struct BetaFixture;

	#[async_trait]
	impl Fixture for BetaFixture {
		async fn load(&self, _context: &ExecutionContext) -> FixtureResult<()> {
			Ok(())
		}

		fn dependencies(&self) -> Vec<FixtureId> {
			vec![FixtureId::of::<AlphaFixture>()]
		}
	}

	#[rstest]
	fn test_fixture_id_equality() {
		assert_eq!(FixtureId::of::<AlphaFixture>(), FixtureId::of::<AlphaFixture>());
		assert_ne!(FixtureId::of::<AlphaFixture>(), FixtureId::of::<BetaFixture>());
	}

	#[rstest]
	fn test_fixture_id_short_name() {
		let id = FixtureId::of::<AlphaFixture>();
		assert_eq!(id.short_name(), "AlphaFixture");
		assert!(id.type_name().ends_with("AlphaFixture"));
	}

	#[rstest]
	fn test_default_dependencies_empty() {
		let instance = FixtureInstance::new(AlphaFixture);
		assert!(instance.dependencies().is_empty());
	}

	#[rstest]
	fn test_declared_dependencies() {
		let instance = FixtureInstance::new(BetaFixture);
		assert_eq!(instance.dependencies(), vec![FixtureId::of::<AlphaFixture>()]);
	}

	#[rstest]
	fn test_set_rejects_duplicate_identity() {
		let mut set = FixtureSet::new();
		assert!(set.insert(FixtureInstance::new(AlphaFixture)));
		assert!(!set.insert(FixtureInstance::new(AlphaFixture)));
		assert_eq!(set.len(), 1);
	}

	#[rstest]
	fn test_set_keeps_discovery_order() {
		let mut set = FixtureSet::new();
		set.insert(FixtureInstance::new(BetaFixture));
		set.insert(FixtureInstance::new(AlphaFixture));

		let ids: Vec<FixtureId> = set.iter().map(|i| i.id()).collect();
		assert_eq!(
			ids,
			vec![FixtureId::of::<BetaFixture>(), FixtureId::of::<AlphaFixture>()]
		);
	}
}
