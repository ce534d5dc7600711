//! Dependency-aware ordering of fixture sets.

use std::collections::{HashMap, HashSet};

use crate::error::{FixtureError, FixtureResult};
use crate::fixture::{FixtureId, FixtureInstance, FixtureSet};

/// Produces the execution order for a fixture set.
///
/// Every fixture is placed after all fixtures it declares as dependencies.
/// Fixtures with no ordering constraint between them keep their discovery
/// order.
pub struct DependencyResolver;

impl DependencyResolver {
	/// Resolves the set into a linear execution order.
	///
	/// # Errors
	///
	/// - [`FixtureError::UnresolvedDependency`] if a fixture declares a
	///   dependency that was never added to the set. Checked up front, so a
	///   missing dependency is reported as such rather than as a cycle.
	/// - [`FixtureError::CyclicDependency`] if the declared dependencies form
	///   a cycle, named as a readable chain.
	pub fn resolve(set: &FixtureSet) -> FixtureResult<Vec<FixtureInstance>> {
		for instance in set.iter() {
			for dep in instance.dependencies() {
				if !set.contains(dep) {
					return Err(FixtureError::UnresolvedDependency {
						fixture: instance.id().type_name().to_string(),
						dependency: dep.type_name().to_string(),
					});
				}
			}
		}

		let mut remaining: Vec<FixtureInstance> = set.iter().cloned().collect();
		let mut sorted: Vec<FixtureInstance> = Vec::with_capacity(remaining.len());
		let mut placed: HashSet<FixtureId> = HashSet::new();

		while !remaining.is_empty() {
			let mut made_progress = false;

			let mut i = 0;
			while i < remaining.len() {
				let deps_satisfied = remaining[i]
					.dependencies()
					.iter()
					.all(|dep| placed.contains(dep));

				if deps_satisfied {
					let instance = remaining.remove(i);
					placed.insert(instance.id());
					sorted.push(instance);
					made_progress = true;
				} else {
					i += 1;
				}
			}

			if !made_progress {
				return Err(FixtureError::CyclicDependency {
					cycle: describe_cycle(&remaining, &placed),
				});
			}
		}

		tracing::debug!(fixtures = sorted.len(), "Resolved fixture order");
		Ok(sorted)
	}
}

/// Walks unsatisfied dependencies among stuck fixtures until one repeats,
/// rendering the cycle as `a -> b -> a`.
fn describe_cycle(remaining: &[FixtureInstance], placed: &HashSet<FixtureId>) -> String {
	let by_id: HashMap<FixtureId, &FixtureInstance> =
		remaining.iter().map(|i| (i.id(), i)).collect();

	let mut path: Vec<FixtureId> = Vec::new();
	let mut current = match remaining.first() {
		Some(instance) => instance.id(),
		None => return String::new(),
	};

	loop {
		if let Some(pos) = path.iter().position(|id| *id == current) {
			let mut names: Vec<&str> = path[pos..].iter().map(|id| id.short_name()).collect();
			names.push(path[pos].short_name());
			return names.join(" -> ");
		}
		path.push(current);

		// Every stuck fixture has at least one unplaced dependency, and that
		// dependency is itself stuck, so the walk stays inside `remaining`.
		let next = by_id
			.get(&current)
			.and_then(|instance| {
				instance
					.dependencies()
					.into_iter()
					.find(|dep| !placed.contains(dep))
			});
		match next {
			Some(dep) => current = dep,
			None => {
				return path
					.iter()
					.map(|id| id.short_name())
					.collect::<Vec<_>>()
					.join(" -> ");
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	use async_trait::async_trait;

	use crate::context::ExecutionContext;
	use crate::fixture::Fixture;

	macro_rules! test_fixture {
		($name:ident) => {
			#[derive(Default)]
			struct $name;

			#[async_trait]
			impl Fixture for $name {
				async fn load(&self, _context: &ExecutionContext) -> FixtureResult<()> {
					Ok(())
				}
			}
		};
		($name:ident => $($dep:ident),+) => {
			#[derive(Default)]
			struct $name;

			#[async_trait]
			impl Fixture for $name {
				async fn load(&self, _context: &ExecutionContext) -> FixtureResult<()> {
					Ok(())
				}

				fn dependencies(&self) -> Vec<FixtureId> {
					vec![$(FixtureId::of::<$dep>()),+]
				}
			}
		};
	}

	test_fixture!(UserFixture);
	test_fixture!(GroupFixture);
	test_fixture!(PostFixture => UserFixture);
	test_fixture!(CommentFixture => PostFixture, UserFixture);
	test_fixture!(CycleLeft => CycleRight);
	test_fixture!(CycleRight => CycleLeft);
	test_fixture!(SelfLoopFixture => SelfLoopFixture);
	test_fixture!(GhostFixture);
	test_fixture!(OrphanFixture => GhostFixture);

	fn set_of(instances: Vec<FixtureInstance>) -> FixtureSet {
		let mut set = FixtureSet::new();
		for instance in instances {
			set.insert(instance);
		}
		set
	}

	fn short_names(ordered: &[FixtureInstance]) -> Vec<&'static str> {
		ordered.iter().map(|i| i.id().short_name()).collect()
	}

	#[rstest]
	fn test_dependency_precedes_dependent() {
		// Discovery order deliberately lists the dependent first
		let set = set_of(vec![
			FixtureInstance::new(PostFixture),
			FixtureInstance::new(UserFixture),
		]);

		let ordered = DependencyResolver::resolve(&set).unwrap();
		assert_eq!(short_names(&ordered), vec!["UserFixture", "PostFixture"]);
	}

	#[rstest]
	fn test_independents_keep_discovery_order() {
		let set = set_of(vec![
			FixtureInstance::new(GroupFixture),
			FixtureInstance::new(UserFixture),
		]);

		let ordered = DependencyResolver::resolve(&set).unwrap();
		assert_eq!(short_names(&ordered), vec!["GroupFixture", "UserFixture"]);
	}

	#[rstest]
	fn test_diamond_orders_all_dependencies_first() {
		let set = set_of(vec![
			FixtureInstance::new(CommentFixture),
			FixtureInstance::new(PostFixture),
			FixtureInstance::new(GroupFixture),
			FixtureInstance::new(UserFixture),
		]);

		let ordered = DependencyResolver::resolve(&set).unwrap();
		let names = short_names(&ordered);

		let pos = |name: &str| names.iter().position(|n| *n == name).unwrap();
		assert!(pos("UserFixture") < pos("PostFixture"));
		assert!(pos("PostFixture") < pos("CommentFixture"));
		// Unconstrained fixture keeps its discovery slot among the ready ones
		assert_eq!(names[0], "GroupFixture");
	}

	#[rstest]
	fn test_cycle_is_named() {
		let set = set_of(vec![
			FixtureInstance::new(CycleLeft),
			FixtureInstance::new(CycleRight),
		]);

		let result = DependencyResolver::resolve(&set);
		match result {
			Err(FixtureError::CyclicDependency { cycle }) => {
				assert!(cycle.contains("CycleLeft"));
				assert!(cycle.contains("CycleRight"));
				assert!(cycle.contains("->"));
			}
			other => panic!("Expected CyclicDependency, got {:?}", other),
		}
	}

	#[rstest]
	fn test_self_dependency_is_a_cycle() {
		let set = set_of(vec![FixtureInstance::new(SelfLoopFixture)]);

		let result = DependencyResolver::resolve(&set);
		match result {
			Err(FixtureError::CyclicDependency { cycle }) => {
				assert_eq!(cycle, "SelfLoopFixture -> SelfLoopFixture");
			}
			other => panic!("Expected CyclicDependency, got {:?}", other),
		}
	}

	#[rstest]
	fn test_missing_dependency_reported_before_ordering() {
		let set = set_of(vec![FixtureInstance::new(OrphanFixture)]);

		let result = DependencyResolver::resolve(&set);
		match result {
			Err(FixtureError::UnresolvedDependency {
				fixture,
				dependency,
			}) => {
				assert!(fixture.ends_with("OrphanFixture"));
				assert!(dependency.ends_with("GhostFixture"));
			}
			other => panic!("Expected UnresolvedDependency, got {:?}", other),
		}
	}

	#[rstest]
	fn test_empty_set_resolves_to_empty_order() {
		let set = FixtureSet::new();
		let ordered = DependencyResolver::resolve(&set).unwrap();
		assert!(ordered.is_empty());
	}
}
