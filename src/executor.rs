//! Orchestration of purge, ordered fixture loads, flush, and commit.

use std::sync::Arc;

use crate::context::ExecutionContext;
use crate::error::{FixtureError, FixtureResult};
use crate::fixture::FixtureInstance;
use crate::purger::Purger;

/// Outcome of one import run.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
	/// Number of fixtures whose load completed.
	pub fixtures_loaded: usize,
	/// Whether existing data was purged before loading.
	pub purged: bool,
}

/// Applies ordered fixtures against the persistence backend.
///
/// The executor runs strictly sequentially: optional purge, then each
/// fixture's `load` in the given order, then one flush. By default the whole
/// run happens inside a single transaction, so a failing fixture leaves no
/// partial data behind.
///
/// # Example
///
/// ```ignore
/// let executor = FixtureExecutor::new(context)
///     .with_purger(Arc::new(DatabasePurger::new(schema)));
///
/// let report = executor.execute(&loader.fixtures()?, false).await?;
/// println!("Loaded {} fixture(s)", report.fixtures_loaded);
/// ```
pub struct FixtureExecutor {
	context: ExecutionContext,
	purger: Option<Arc<dyn Purger>>,
	transactional: bool,
}

impl FixtureExecutor {
	/// Creates an executor without a purger, running transactionally.
	pub fn new(context: ExecutionContext) -> Self {
		Self {
			context,
			purger: None,
			transactional: true,
		}
	}

	/// Supplies the purger used on non-append runs.
	pub fn with_purger(mut self, purger: Arc<dyn Purger>) -> Self {
		self.purger = Some(purger);
		self
	}

	/// Turns the run-spanning transaction on or off.
	///
	/// Without a transaction a mid-run failure leaves the writes of earlier
	/// fixtures behind.
	pub fn with_transaction(mut self, transactional: bool) -> Self {
		self.transactional = transactional;
		self
	}

	/// Returns the execution context fixtures will load through.
	pub fn context(&self) -> &ExecutionContext {
		&self.context
	}

	/// Runs the import: purge (unless `append`), ordered loads, one flush.
	///
	/// `fixtures` must already be in dependency order; the executor applies
	/// them exactly as given. Failures are never retried.
	///
	/// # Errors
	///
	/// - [`FixtureError::PurgerNotConfigured`] if a purge is required but no
	///   purger was supplied.
	/// - [`FixtureError::FixtureLoad`] naming the first fixture whose load
	///   failed; on a transactional run the transaction is rolled back
	///   first.
	/// - [`FixtureError::Database`] for purge, flush, or transaction
	///   failures.
	pub async fn execute(
		&self,
		fixtures: &[FixtureInstance],
		append: bool,
	) -> FixtureResult<ExecutionReport> {
		let backend = self.context.backend();

		if self.transactional {
			backend.begin().await?;
		}

		match self.run(fixtures, append).await {
			Ok(report) => {
				if self.transactional {
					backend.commit().await?;
				}
				Ok(report)
			}
			Err(err) => {
				if self.transactional {
					// Keep the original error even if rollback fails too
					if let Err(rollback_err) = backend.rollback().await {
						tracing::error!(
							error = %rollback_err,
							"Rollback failed after import error"
						);
					}
				}
				Err(err)
			}
		}
	}

	async fn run(
		&self,
		fixtures: &[FixtureInstance],
		append: bool,
	) -> FixtureResult<ExecutionReport> {
		let purged = if append {
			false
		} else {
			let purger = self
				.purger
				.as_ref()
				.ok_or(FixtureError::PurgerNotConfigured)?;
			purger.purge(&self.context).await?;
			true
		};

		for fixture in fixtures {
			tracing::debug!(fixture = fixture.id().type_name(), "Loading fixture");
			fixture
				.load(&self.context)
				.await
				.map_err(|e| FixtureError::during_load(fixture.id().short_name(), e))?;
		}

		// One flush batches every fixture's writes
		self.context.backend().flush().await?;

		tracing::info!(fixtures = fixtures.len(), purged, "Applied fixtures");

		Ok(ExecutionReport {
			fixtures_loaded: fixtures.len(),
			purged,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	use async_trait::async_trait;

	use crate::fixture::Fixture;
	use crate::purger::DatabasePurger;
	use crate::schema::{StaticSchemaProvider, TableInfo};
	use crate::testing::{CountingPurger, recording_context};

	#[derive(Default)]
	struct UserRowFixture;

	#[async_trait]
	impl Fixture for UserRowFixture {
		async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
			context
				.insert("users")
				.value("username", "admin")
				.execute()
				.await?;
			Ok(())
		}
	}

	#[derive(Default)]
	struct PostRowFixture;

	#[async_trait]
	impl Fixture for PostRowFixture {
		async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
			context
				.insert("posts")
				.value("title", "hello")
				.execute()
				.await?;
			Ok(())
		}
	}

	fn user_schema_purger() -> Arc<DatabasePurger> {
		Arc::new(DatabasePurger::new(Arc::new(StaticSchemaProvider::new(
			vec![TableInfo::new("users")],
		))))
	}

	#[rstest]
	#[tokio::test]
	async fn test_purge_runs_before_any_load() {
		let (backend, context) = recording_context();
		let executor = FixtureExecutor::new(context).with_purger(user_schema_purger());

		let fixtures = vec![FixtureInstance::new(UserRowFixture)];
		let report = executor.execute(&fixtures, false).await.unwrap();

		assert!(report.purged);
		let sql = backend.executed_sql();
		assert_eq!(sql.len(), 2);
		assert!(sql[0].starts_with("DELETE FROM"));
		assert!(sql[1].starts_with("INSERT INTO"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_append_never_purges() {
		let (_backend, context) = recording_context();
		let purger = Arc::new(CountingPurger::new());
		let executor = FixtureExecutor::new(context).with_purger(purger.clone());

		let fixtures = vec![FixtureInstance::new(UserRowFixture)];
		let report = executor.execute(&fixtures, true).await.unwrap();

		assert_eq!(purger.purge_count(), 0);
		assert!(!report.purged);
		assert_eq!(report.fixtures_loaded, 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_purge_without_purger_fails() {
		let (_backend, context) = recording_context();
		let executor = FixtureExecutor::new(context);

		let result = executor.execute(&[], false).await;
		assert!(matches!(result, Err(FixtureError::PurgerNotConfigured)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_append_without_purger_is_fine() {
		let (_backend, context) = recording_context();
		let executor = FixtureExecutor::new(context);

		let report = executor.execute(&[], true).await.unwrap();
		assert_eq!(report.fixtures_loaded, 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_successful_run_commits_and_flushes_once() {
		let (backend, context) = recording_context();
		let executor = FixtureExecutor::new(context).with_purger(user_schema_purger());

		let fixtures = vec![
			FixtureInstance::new(UserRowFixture),
			FixtureInstance::new(PostRowFixture),
		];
		let report = executor.execute(&fixtures, false).await.unwrap();

		assert_eq!(report.fixtures_loaded, 2);
		assert_eq!(backend.begin_count(), 1);
		assert_eq!(backend.commit_count(), 1);
		assert_eq!(backend.rollback_count(), 0);
		assert_eq!(backend.flush_count(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_failure_names_fixture_and_rolls_back() {
		let (backend, context) = recording_context();
		backend.fail_matching("\"posts\"");
		let executor = FixtureExecutor::new(context).with_purger(user_schema_purger());

		let fixtures = vec![
			FixtureInstance::new(UserRowFixture),
			FixtureInstance::new(PostRowFixture),
		];
		let result = executor.execute(&fixtures, false).await;

		match result {
			Err(FixtureError::FixtureLoad { fixture, source }) => {
				assert_eq!(fixture, "PostRowFixture");
				assert!(matches!(*source, FixtureError::Database(_)));
			}
			other => panic!("Expected FixtureLoad, got {:?}", other),
		}
		assert_eq!(backend.begin_count(), 1);
		assert_eq!(backend.commit_count(), 0);
		assert_eq!(backend.rollback_count(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_non_transactional_run_skips_transaction_calls() {
		let (backend, context) = recording_context();
		let executor = FixtureExecutor::new(context)
			.with_purger(user_schema_purger())
			.with_transaction(false);

		let fixtures = vec![FixtureInstance::new(UserRowFixture)];
		executor.execute(&fixtures, false).await.unwrap();

		assert_eq!(backend.begin_count(), 0);
		assert_eq!(backend.commit_count(), 0);
		assert_eq!(backend.flush_count(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_non_transactional_failure_keeps_earlier_writes() {
		let (backend, context) = recording_context();
		backend.fail_matching("\"posts\"");
		let executor = FixtureExecutor::new(context)
			.with_purger(user_schema_purger())
			.with_transaction(false);

		let fixtures = vec![
			FixtureInstance::new(UserRowFixture),
			FixtureInstance::new(PostRowFixture),
		];
		let result = executor.execute(&fixtures, false).await;

		assert!(result.is_err());
		assert_eq!(backend.rollback_count(), 0);
		// The user insert was already executed when the post insert failed
		assert!(
			backend
				.executed_sql()
				.iter()
				.any(|sql| sql.starts_with("INSERT INTO \"users\""))
		);
	}
}
