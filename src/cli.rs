//! CLI surface for the `data-fixture` binary.
//!
//! This module parses command-line arguments and dispatches them to the
//! commands in [`commands`](crate::commands). The database stays abstract:
//! callers hand [`run`] the [`ExecutionContext`] their application already
//! owns, so the same binary surface works against any backend.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::commands::{ImportArgs, ImportCommand, ImportOptions};
use crate::config::ImportConfig;
use crate::context::ExecutionContext;
use crate::error::FixtureResult;
use crate::executor::ExecutionReport;
use crate::schema::{SchemaProvider, StaticSchemaProvider};

/// Data fixture management CLI.
///
/// This is the CLI parser used by [`run`]. Can also be used directly for
/// testing CLI parsing behavior.
#[derive(Debug, Parser)]
#[command(name = "data-fixture")]
#[command(about = "Data fixture management interface", long_about = None)]
#[command(version)]
pub struct Cli {
	/// Subcommand to execute
	#[command(subcommand)]
	pub command: Commands,

	/// Verbosity level (can be repeated for more output)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbosity: u8,
}

/// Command-line interface commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
	/// Import data fixtures into the database
	Import {
		/// Append data to existing data instead of purging first
		#[arg(long)]
		append: bool,

		/// Truncate tables before inserting data instead of deleting rows
		#[arg(long)]
		purge_with_truncate: bool,

		/// Path to a fixture file or directory to be added
		#[arg(long, value_name = "PATH")]
		fixtures: Option<PathBuf>,

		/// Configuration file (default: data-fixtures.toml when present)
		#[arg(short, long, value_name = "PATH")]
		config: Option<PathBuf>,
	},
}

/// Runs a parsed CLI invocation against the given execution context.
///
/// Purgeable tables come from the resolved configuration's `[[tables]]`
/// entries. Use [`run_with_schema`] when the application can enumerate its
/// schema itself.
///
/// # Example
///
/// ```ignore
/// let cli = Cli::parse();
/// let context = ExecutionContext::new(backend);
/// if let Err(e) = cli::run(cli, context).await {
///     eprintln!("Error: {}", e);
///     std::process::exit(1);
/// }
/// ```
pub async fn run(cli: Cli, context: ExecutionContext) -> FixtureResult<ExecutionReport> {
	dispatch(cli, context, None).await
}

/// Runs a parsed CLI invocation with an explicit schema provider.
pub async fn run_with_schema(
	cli: Cli,
	context: ExecutionContext,
	schema: Arc<dyn SchemaProvider>,
) -> FixtureResult<ExecutionReport> {
	dispatch(cli, context, Some(schema)).await
}

async fn dispatch(
	cli: Cli,
	context: ExecutionContext,
	schema: Option<Arc<dyn SchemaProvider>>,
) -> FixtureResult<ExecutionReport> {
	match cli.command {
		Commands::Import {
			append,
			purge_with_truncate,
			fixtures,
			config,
		} => {
			let config = ImportConfig::resolve(config.as_deref())?;
			let schema = schema
				.unwrap_or_else(|| Arc::new(StaticSchemaProvider::new(config.schema_tables())));

			let command = ImportCommand::new(context, schema, config);
			let args = ImportArgs { fixtures };
			let options = ImportOptions::new()
				.with_append(append)
				.with_purge_with_truncate(purge_with_truncate)
				.with_verbosity(cli.verbosity);

			command.execute(args, options).await
		}
	}
}
