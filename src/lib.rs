//! Dependency-aware data fixture loading for relational databases.
//!
//! This crate provides the engine behind the `data-fixture import` command:
//!
//! - **Registration**: fixtures announce themselves at compile time with
//!   [`register_fixture!`], keyed by the declaring source file
//! - **Discovery**: collect fixtures from a file, a directory tree, or
//!   programmatically, deduplicated by fixture type
//! - **Ordering**: topologically sort fixtures so declared dependencies
//!   load first
//! - **Purging**: optionally empty target tables beforehand, by `DELETE`
//!   or `TRUNCATE`
//! - **Execution**: run every fixture through one shared persistence
//!   context, inside a single transaction by default
//!
//! # Quick Start
//!
//! Declare a fixture and register it for discovery:
//!
//! ```ignore
//! use data_fixtures::prelude::*;
//!
//! #[derive(Default)]
//! struct UserFixture;
//!
//! #[async_trait]
//! impl Fixture for UserFixture {
//!     async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
//!         context
//!             .insert("users")
//!             .value("username", "admin")
//!             .value("is_active", true)
//!             .execute()
//!             .await?;
//!         context.set_reference("user.admin", 1i64);
//!         Ok(())
//!     }
//! }
//!
//! register_fixture!(UserFixture);
//! ```
//!
//! Fixtures that build on other fixtures declare the dependency and read
//! shared references instead of duplicating lookups:
//!
//! ```ignore
//! #[async_trait]
//! impl Fixture for PostFixture {
//!     async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
//!         let author = context.reference("user.admin")?;
//!         context
//!             .insert("posts")
//!             .value("author_id", author)
//!             .value("title", "Welcome")
//!             .execute()
//!             .await?;
//!         Ok(())
//!     }
//!
//!     fn dependencies(&self) -> Vec<FixtureId> {
//!         vec![FixtureId::of::<UserFixture>()]
//!     }
//! }
//! ```
//!
//! Import a directory of fixtures, purging existing data first:
//!
//! ```ignore
//! let mut loader = FixtureLoader::new();
//! loader.load_from_directory("fixtures")?;
//!
//! let context = ExecutionContext::new(backend);
//! let executor = FixtureExecutor::new(context)
//!     .with_purger(Arc::new(DatabasePurger::new(schema)));
//! let report = executor.execute(&loader.fixtures()?, false).await?;
//! println!("Imported {} fixture(s)", report.fixtures_loaded);
//! ```
//!
//! # Architecture
//!
//! - [`FixtureLoader`](loader::FixtureLoader) - path-based discovery and
//!   deduplication over the compile-time registry
//! - [`DependencyResolver`](resolver::DependencyResolver) - stable
//!   topological ordering of fixtures
//! - [`DatabasePurger`](purger::DatabasePurger) - empties tables children
//!   first, by `DELETE` or `TRUNCATE`
//! - [`FixtureExecutor`](executor::FixtureExecutor) - purge, load, flush,
//!   one transaction
//! - [`ImportCommand`](commands::ImportCommand) - the command surface the
//!   [`cli`] module wires flags into
//!
//! The database itself stays behind two seams: statements go through
//! [`PersistenceBackend`](context::PersistenceBackend), and table metadata
//! for purging comes from a [`SchemaProvider`](schema::SchemaProvider).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod fixture;
pub mod loader;
pub mod prelude;
pub mod purger;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod testing;
pub mod value;

// Re-export commonly used types at crate root
pub use commands::{ImportArgs, ImportCommand, ImportOptions};
pub use config::{ImportConfig, TableConfig};
pub use context::{ExecuteResult, ExecutionContext, InsertStatement, PersistenceBackend};
pub use error::{FixtureError, FixtureResult};
pub use executor::{ExecutionReport, FixtureExecutor};
pub use fixture::{Fixture, FixtureId, FixtureInstance, FixtureSet};
pub use loader::FixtureLoader;
pub use purger::{DatabasePurger, PurgeMode, Purger};
pub use registry::{FixtureRegistration, registered_fixtures, registrations_matching};
pub use resolver::DependencyResolver;
pub use schema::{SchemaProvider, StaticSchemaProvider, TableInfo, dependency_order};
pub use value::FieldValue;

// Re-export inventory for macro usage
pub use inventory;
