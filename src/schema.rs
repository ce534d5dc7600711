//! Schema metadata consumed by the purger.
//!
//! The pipeline does not introspect the database. Whoever owns the schema
//! supplies a [`SchemaProvider`]; the purger only needs table names and their
//! foreign-key dependencies to empty tables in a safe order.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;

use crate::error::{FixtureError, FixtureResult};

/// A table together with the tables its foreign keys reference.
#[derive(Debug, Clone)]
pub struct TableInfo {
	/// Table name as known to the database.
	pub name: String,
	/// Names of tables this table's foreign keys point at.
	pub depends_on: Vec<String>,
}

impl TableInfo {
	/// Creates a table entry with no dependencies.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			depends_on: Vec::new(),
		}
	}

	/// Adds a foreign-key dependency on another table.
	pub fn with_dependency(mut self, table: impl Into<String>) -> Self {
		self.depends_on.push(table.into());
		self
	}
}

/// Enumerates the tables fixtures write into.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
	/// Returns every table the pipeline may purge, with FK dependencies.
	async fn tables(&self) -> FixtureResult<Vec<TableInfo>>;
}

/// Schema provider over a fixed table list.
///
/// # Example
///
/// ```ignore
/// let schema = StaticSchemaProvider::new(vec![
///     TableInfo::new("users"),
///     TableInfo::new("posts").with_dependency("users"),
/// ]);
/// ```
#[derive(Debug, Default)]
pub struct StaticSchemaProvider {
	tables: Vec<TableInfo>,
}

impl StaticSchemaProvider {
	/// Creates a provider over the given tables.
	pub fn new(tables: Vec<TableInfo>) -> Self {
		Self { tables }
	}
}

#[async_trait]
impl SchemaProvider for StaticSchemaProvider {
	async fn tables(&self) -> FixtureResult<Vec<TableInfo>> {
		Ok(self.tables.clone())
	}
}

/// Orders tables so every referenced table precedes its referencing tables.
///
/// Dependencies on tables outside the given list and self-references are
/// ignored. Tables with no ordering constraint between them keep their
/// declaration order.
///
/// # Errors
///
/// Returns [`FixtureError::CyclicDependency`] if the foreign keys form a
/// cycle, naming the tables involved.
pub fn dependency_order(tables: &[TableInfo]) -> FixtureResult<Vec<String>> {
	let index_of: HashMap<&str, usize> = tables
		.iter()
		.enumerate()
		.map(|(i, t)| (t.name.as_str(), i))
		.collect();

	let mut in_degree = vec![0usize; tables.len()];
	let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tables.len()];

	// Build the graph, counting only dependencies inside the table set
	for (i, table) in tables.iter().enumerate() {
		for dep in &table.depends_on {
			match index_of.get(dep.as_str()) {
				Some(&j) if j != i => {
					in_degree[i] += 1;
					dependents[j].push(i);
				}
				_ => {}
			}
		}
	}

	// Kahn's algorithm, seeded in declaration order to keep ties stable
	let mut queue: VecDeque<usize> = (0..tables.len()).filter(|&i| in_degree[i] == 0).collect();
	let mut sorted = Vec::with_capacity(tables.len());

	while let Some(i) = queue.pop_front() {
		sorted.push(tables[i].name.clone());
		for &dependent in &dependents[i] {
			in_degree[dependent] -= 1;
			if in_degree[dependent] == 0 {
				queue.push_back(dependent);
			}
		}
	}

	if sorted.len() != tables.len() {
		let remaining: Vec<&str> = tables
			.iter()
			.enumerate()
			.filter(|&(i, _)| in_degree[i] > 0)
			.map(|(_, t)| t.name.as_str())
			.collect();
		return Err(FixtureError::CyclicDependency {
			cycle: remaining.join(" -> "),
		});
	}

	Ok(sorted)
}
