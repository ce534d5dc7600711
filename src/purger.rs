//! Purge strategies for emptying fixture tables before a load.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::{ExecutionContext, quote_identifier};
use crate::error::FixtureResult;
use crate::schema::{SchemaProvider, dependency_order};

/// Strategy used to empty tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeMode {
	/// `DELETE FROM` per table, honoring foreign-key order. The default.
	#[default]
	Delete,
	/// `TRUNCATE TABLE` per table. Faster, but foreign-key handling is
	/// backend-specific; see
	/// [`with_truncate_cascade`](DatabasePurger::with_truncate_cascade).
	Truncate,
}

/// Empties the tables fixtures write into.
///
/// Purging is irreversible data loss, so implementations are only ever
/// invoked by the executor on a non-append run.
#[async_trait]
pub trait Purger: Send + Sync {
	/// Removes existing data through the shared execution context.
	async fn purge(&self, context: &ExecutionContext) -> FixtureResult<()>;
}

/// Purger driven by schema metadata.
///
/// Tables are emptied in reverse foreign-key dependency order, so
/// referencing tables are cleared before the tables they point at.
pub struct DatabasePurger {
	schema: Arc<dyn SchemaProvider>,
	mode: PurgeMode,
	truncate_cascade: bool,
}

impl DatabasePurger {
	/// Creates a purger over the given schema, defaulting to
	/// [`PurgeMode::Delete`].
	pub fn new(schema: Arc<dyn SchemaProvider>) -> Self {
		Self {
			schema,
			mode: PurgeMode::default(),
			truncate_cascade: false,
		}
	}

	/// Sets the purge strategy.
	pub fn set_purge_mode(&mut self, mode: PurgeMode) {
		self.mode = mode;
	}

	/// Sets the purge strategy, builder-style.
	pub fn with_purge_mode(mut self, mode: PurgeMode) -> Self {
		self.mode = mode;
		self
	}

	/// Appends `CASCADE` to truncate statements.
	///
	/// Some backends reject truncating a table that other tables reference,
	/// even when the referencing tables are truncated in the same run. This
	/// is an explicit opt-in because it widens the blast radius to any
	/// referencing table the schema provider does not know about.
	pub fn with_truncate_cascade(mut self, cascade: bool) -> Self {
		self.truncate_cascade = cascade;
		self
	}

	/// Returns the active purge strategy.
	pub fn mode(&self) -> PurgeMode {
		self.mode
	}

	fn statement_for(&self, table: &str) -> String {
		match self.mode {
			PurgeMode::Delete => format!("DELETE FROM {}", quote_identifier(table)),
			PurgeMode::Truncate if self.truncate_cascade => {
				format!("TRUNCATE TABLE {} CASCADE", quote_identifier(table))
			}
			PurgeMode::Truncate => format!("TRUNCATE TABLE {}", quote_identifier(table)),
		}
	}
}

#[async_trait]
impl Purger for DatabasePurger {
	async fn purge(&self, context: &ExecutionContext) -> FixtureResult<()> {
		let tables = self.schema.tables().await?;
		let mut order = dependency_order(&tables)?;
		// Children first
		order.reverse();

		for table in &order {
			let sql = self.statement_for(table);
			context.execute(&sql, Vec::new()).await?;
		}

		tracing::info!(tables = order.len(), mode = ?self.mode, "Purged fixture tables");
		Ok(())
	}
}
