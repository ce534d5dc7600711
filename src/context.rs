//! The persistence seam and the per-run execution context.
//!
//! The pipeline never talks to a database driver directly. Everything goes
//! through [`PersistenceBackend`], and fixtures receive a shared
//! [`ExecutionContext`] that wraps the backend together with the run's
//! shared reference map.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{FixtureError, FixtureResult};
use crate::value::FieldValue;

/// Outcome of a single SQL statement.
#[derive(Debug, Clone)]
pub struct ExecuteResult {
	/// Number of rows the statement affected.
	pub rows_affected: u64,
}

/// The live database handle consumed by the pipeline.
///
/// One backend instance serves exactly one import run at a time; the pipeline
/// issues strictly sequential calls and never shares the handle across
/// concurrent runs.
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
	/// Executes a parameterized SQL statement.
	async fn execute(&self, sql: &str, params: Vec<FieldValue>) -> FixtureResult<ExecuteResult>;

	/// Opens a transaction spanning the whole import run.
	async fn begin(&self) -> FixtureResult<()>;

	/// Commits the current transaction.
	async fn commit(&self) -> FixtureResult<()>;

	/// Rolls back the current transaction.
	async fn rollback(&self) -> FixtureResult<()>;

	/// Pushes any buffered writes to the database.
	///
	/// Backends that write through on every `execute` keep the default no-op.
	async fn flush(&self) -> FixtureResult<()> {
		Ok(())
	}
}

/// Shared per-run context handed to every fixture's `load` call.
///
/// Cloning is cheap; all clones observe the same backend and the same
/// reference map. The context is created once per import run and discarded
/// with it.
#[derive(Clone)]
pub struct ExecutionContext {
	backend: Arc<dyn PersistenceBackend>,
	references: Arc<RwLock<HashMap<String, FieldValue>>>,
}

impl ExecutionContext {
	/// Wraps a persistence backend for one import run.
	pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
		Self {
			backend,
			references: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Returns the underlying backend handle.
	pub fn backend(&self) -> Arc<dyn PersistenceBackend> {
		self.backend.clone()
	}

	/// Executes a parameterized SQL statement.
	pub async fn execute(
		&self,
		sql: &str,
		params: Vec<FieldValue>,
	) -> FixtureResult<ExecuteResult> {
		self.backend.execute(sql, params).await
	}

	/// Starts building an INSERT into the given table.
	///
	/// # Example
	///
	/// ```ignore
	/// context
	///     .insert("users")
	///     .value("username", "admin")
	///     .value("is_active", true)
	///     .execute()
	///     .await?;
	/// ```
	pub fn insert(&self, table: impl Into<String>) -> InsertStatement {
		InsertStatement::new(self.backend.clone(), table)
	}

	/// Stores a value under a name visible to every later fixture in the run.
	///
	/// A fixture typically stores the key of a row it inserted so that
	/// dependent fixtures can build foreign keys from it. Storing under an
	/// existing name replaces the previous value.
	pub fn set_reference(&self, name: impl Into<String>, value: impl Into<FieldValue>) {
		self.references.write().insert(name.into(), value.into());
	}

	/// Looks up a value stored by an earlier fixture.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::UnknownReference`] if nothing was stored under
	/// `name`.
	pub fn reference(&self, name: &str) -> FixtureResult<FieldValue> {
		self.references
			.read()
			.get(name)
			.cloned()
			.ok_or_else(|| FixtureError::UnknownReference(name.to_string()))
	}

	/// Returns whether a reference with the given name exists.
	pub fn has_reference(&self, name: &str) -> bool {
		self.references.read().contains_key(name)
	}
}

/// Parameterized INSERT builder for fixture rows.
///
/// Identifiers are double-quoted and values are bound as `$n` placeholders.
pub struct InsertStatement {
	backend: Arc<dyn PersistenceBackend>,
	table: String,
	columns: Vec<String>,
	params: Vec<FieldValue>,
}

impl InsertStatement {
	fn new(backend: Arc<dyn PersistenceBackend>, table: impl Into<String>) -> Self {
		Self {
			backend,
			table: table.into(),
			columns: Vec::new(),
			params: Vec::new(),
		}
	}

	/// Adds a column/value pair.
	pub fn value(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
		self.columns.push(column.into());
		self.params.push(value.into());
		self
	}

	/// Renders the statement without executing it.
	pub fn build(&self) -> String {
		let columns = self
			.columns
			.iter()
			.map(|c| quote_identifier(c))
			.collect::<Vec<_>>()
			.join(", ");
		let placeholders = (1..=self.params.len())
			.map(|i| format!("${}", i))
			.collect::<Vec<_>>()
			.join(", ");
		format!(
			"INSERT INTO {} ({}) VALUES ({})",
			quote_identifier(&self.table),
			columns,
			placeholders
		)
	}

	/// Executes the statement against the backend.
	pub async fn execute(self) -> FixtureResult<ExecuteResult> {
		let sql = self.build();
		self.backend.execute(&sql, self.params).await
	}
}

/// Double-quotes an SQL identifier, escaping embedded quotes.
pub(crate) fn quote_identifier(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}
