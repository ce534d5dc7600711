//! Testing utilities for fixture pipelines.
//!
//! Provides an in-memory [`PersistenceBackend`] and a counting [`Purger`] so
//! fixtures and import flows can be exercised without a database.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::context::{ExecuteResult, ExecutionContext, PersistenceBackend};
use crate::error::{FixtureError, FixtureResult};
use crate::purger::Purger;
use crate::value::FieldValue;

/// In-memory backend that records every call made to it.
///
/// # Example
///
/// ```ignore
/// let backend = Arc::new(RecordingBackend::new());
/// let context = ExecutionContext::new(backend.clone());
///
/// context.insert("users").value("username", "admin").execute().await?;
/// assert_eq!(backend.executed_sql().len(), 1);
/// ```
#[derive(Default)]
pub struct RecordingBackend {
	statements: Mutex<Vec<(String, Vec<FieldValue>)>>,
	fail_on: Mutex<Option<String>>,
	begins: AtomicUsize,
	commits: AtomicUsize,
	rollbacks: AtomicUsize,
	flushes: AtomicUsize,
}

impl RecordingBackend {
	/// Creates a backend that accepts every statement.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes `execute` fail with a database error for any statement whose
	/// SQL contains `sql_fragment`.
	pub fn fail_matching(&self, sql_fragment: impl Into<String>) {
		*self.fail_on.lock() = Some(sql_fragment.into());
	}

	/// Returns every executed statement with its bound parameters.
	pub fn statements(&self) -> Vec<(String, Vec<FieldValue>)> {
		self.statements.lock().clone()
	}

	/// Returns the SQL text of every executed statement, in order.
	pub fn executed_sql(&self) -> Vec<String> {
		self.statements.lock().iter().map(|(sql, _)| sql.clone()).collect()
	}

	/// Number of `begin` calls observed.
	pub fn begin_count(&self) -> usize {
		self.begins.load(Ordering::SeqCst)
	}

	/// Number of `commit` calls observed.
	pub fn commit_count(&self) -> usize {
		self.commits.load(Ordering::SeqCst)
	}

	/// Number of `rollback` calls observed.
	pub fn rollback_count(&self) -> usize {
		self.rollbacks.load(Ordering::SeqCst)
	}

	/// Number of `flush` calls observed.
	pub fn flush_count(&self) -> usize {
		self.flushes.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PersistenceBackend for RecordingBackend {
	async fn execute(&self, sql: &str, params: Vec<FieldValue>) -> FixtureResult<ExecuteResult> {
		{
			let fail_on = self.fail_on.lock();
			if let Some(fragment) = fail_on.as_deref() {
				if sql.contains(fragment) {
					return Err(FixtureError::Database(format!(
						"simulated failure on: {}",
						sql
					)));
				}
			}
		}
		self.statements.lock().push((sql.to_string(), params));
		Ok(ExecuteResult { rows_affected: 1 })
	}

	async fn begin(&self) -> FixtureResult<()> {
		self.begins.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	async fn commit(&self) -> FixtureResult<()> {
		self.commits.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	async fn rollback(&self) -> FixtureResult<()> {
		self.rollbacks.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	async fn flush(&self) -> FixtureResult<()> {
		self.flushes.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

/// Purger that only counts how often it is invoked.
///
/// Useful for asserting that append-mode runs never purge.
#[derive(Default)]
pub struct CountingPurger {
	calls: AtomicUsize,
}

impl CountingPurger {
	/// Creates a purger with a zeroed counter.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of `purge` calls observed.
	pub fn purge_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Purger for CountingPurger {
	async fn purge(&self, _context: &ExecutionContext) -> FixtureResult<()> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

/// Builds an execution context over a fresh [`RecordingBackend`].
///
/// Returns the backend alongside the context for later inspection.
pub fn recording_context() -> (Arc<RecordingBackend>, ExecutionContext) {
	let backend = Arc::new(RecordingBackend::new());
	let context = ExecutionContext::new(backend.clone());
	(backend, context)
}
