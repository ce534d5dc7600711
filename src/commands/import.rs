//! Import command implementation.
//!
//! This command collects fixtures from an explicit path or the configured
//! directories, orders them by their declared dependencies, and hands them to
//! the executor, purging existing data first unless append mode is on.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ImportConfig;
use crate::context::ExecutionContext;
use crate::error::{FixtureError, FixtureResult};
use crate::executor::{ExecutionReport, FixtureExecutor};
use crate::fixture::FixtureInstance;
use crate::loader::FixtureLoader;
use crate::purger::{DatabasePurger, PurgeMode};
use crate::schema::SchemaProvider;

/// Arguments for the import command.
#[derive(Debug, Clone, Default)]
pub struct ImportArgs {
	/// Fixture file or directory to load.
	///
	/// When omitted, the configured fixture directories are loaded instead.
	pub fixtures: Option<PathBuf>,
}

/// Options for the import command.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
	/// Append data to existing data instead of purging first.
	pub append: bool,

	/// Truncate tables before inserting data instead of deleting rows.
	pub purge_with_truncate: bool,

	/// Verbosity level.
	pub verbosity: u8,
}

impl ImportOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets append mode.
	pub fn with_append(mut self, append: bool) -> Self {
		self.append = append;
		self
	}

	/// Sets the truncate purge flag.
	pub fn with_purge_with_truncate(mut self, truncate: bool) -> Self {
		self.purge_with_truncate = truncate;
		self
	}

	/// Sets verbosity level.
	pub fn with_verbosity(mut self, level: u8) -> Self {
		self.verbosity = level;
		self
	}
}

/// The import command for populating the database from data fixtures.
///
/// Collaborators are injected at construction: the execution context the
/// fixtures load through, the schema provider the purger enumerates tables
/// from, and the resolved configuration.
///
/// # Example
///
/// ```ignore
/// let command = ImportCommand::new(context, schema, ImportConfig::resolve(None)?);
/// let args = ImportArgs {
///     fixtures: Some(PathBuf::from("db/fixtures")),
/// };
/// let options = ImportOptions::new().with_verbosity(1);
/// let report = command.execute(args, options).await?;
/// println!("Imported {} fixture(s)", report.fixtures_loaded);
/// ```
pub struct ImportCommand {
	context: ExecutionContext,
	schema: Arc<dyn SchemaProvider>,
	config: ImportConfig,
}

impl ImportCommand {
	/// Creates an import command over the given collaborators.
	pub fn new(
		context: ExecutionContext,
		schema: Arc<dyn SchemaProvider>,
		config: ImportConfig,
	) -> Self {
		Self {
			context,
			schema,
			config,
		}
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"data-fixture:import"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Import Data Fixtures"
	}

	/// Returns the command help text.
	pub fn help(&self) -> &str {
		r#"
Usage: data-fixture import [options]

Imports data fixtures into the database, purging existing data first
unless --append is given.

Options:
  --fixtures PATH        Path to a fixture file or directory to be added
  --append               Append data to existing data (skip the purge)
  --purge-with-truncate  Truncate tables before inserting data
  --config PATH          Configuration file (default: data-fixtures.toml)
"#
	}

	/// Executes the import command.
	///
	/// Fixtures come from the explicit path when one is given, otherwise
	/// from every configured fixture directory. The purge strategy comes
	/// from configuration unless `purge_with_truncate` forces truncation.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::NotFound`] if the explicit path does not
	/// exist, plus any discovery, ordering, or execution error from the
	/// underlying pipeline.
	pub async fn execute(
		&self,
		args: ImportArgs,
		options: ImportOptions,
	) -> FixtureResult<ExecutionReport> {
		let mut loader = FixtureLoader::new();
		let mut loaded: Vec<(PathBuf, usize)> = Vec::new();

		match &args.fixtures {
			Some(path) if path.is_dir() => {
				let added = loader.load_from_directory(path)?;
				loaded.push((path.clone(), added));
			}
			Some(path) if path.exists() => {
				loader.load_from_file(path)?;
				loaded.push((path.clone(), 1));
			}
			Some(path) => {
				return Err(FixtureError::NotFound(path.display().to_string()));
			}
			None => {
				for path in &self.config.fixture_paths {
					let added = loader.load_from_directory(path)?;
					loaded.push((path.clone(), added));
				}
			}
		}

		let ordered = loader.fixtures()?;

		let mode = if options.purge_with_truncate {
			PurgeMode::Truncate
		} else {
			self.config.purge_mode
		};
		let purger = DatabasePurger::new(self.schema.clone())
			.with_purge_mode(mode)
			.with_truncate_cascade(self.config.truncate_cascade);

		let executor = FixtureExecutor::new(self.context.clone())
			.with_purger(Arc::new(purger))
			.with_transaction(self.config.transactional);

		let report = executor.execute(&ordered, options.append).await?;

		if options.verbosity > 0 {
			self.print_result(&report, &loaded, &ordered, options.verbosity);
		}

		Ok(report)
	}

	/// Prints the import result summary.
	fn print_result(
		&self,
		report: &ExecutionReport,
		loaded: &[(PathBuf, usize)],
		ordered: &[FixtureInstance],
		verbosity: u8,
	) {
		println!("Imported {} fixture(s)", report.fixtures_loaded);

		if report.purged {
			println!("Purged existing data before import");
		}

		for (path, added) in loaded {
			println!("  {} fixture(s) from {}", added, path.display());
		}

		if verbosity > 1 {
			println!("Execution order:");
			for (index, fixture) in ordered.iter().enumerate() {
				println!("  {}. {}", index + 1, fixture.id().short_name());
			}
		}
	}
}
