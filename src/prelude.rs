//! Convenience re-exports for common usage.
//!
//! This module provides a single import for the most commonly used items
//! from the data-fixtures crate.
//!
//! # Example
//!
//! ```ignore
//! use data_fixtures::prelude::*;
//!
//! // Now you have access to:
//! // - The Fixture trait and registration macro
//! // - Loader, resolver, purger, and executor types
//! // - Command types
//! // - Error types
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Fixture types
pub use crate::fixture::{Fixture, FixtureId, FixtureInstance, FixtureSet};

// Discovery and ordering
pub use crate::loader::FixtureLoader;
pub use crate::registry::{FixtureRegistration, registered_fixtures};
pub use crate::resolver::DependencyResolver;

// Execution types
pub use crate::context::{ExecuteResult, ExecutionContext, InsertStatement, PersistenceBackend};
pub use crate::executor::{ExecutionReport, FixtureExecutor};
pub use crate::purger::{DatabasePurger, PurgeMode, Purger};
pub use crate::schema::{SchemaProvider, StaticSchemaProvider, TableInfo};
pub use crate::value::FieldValue;

// Configuration and command types
pub use crate::commands::{ImportArgs, ImportCommand, ImportOptions};
pub use crate::config::ImportConfig;

// Registration macro
pub use crate::register_fixture;

// Async trait support for fixture implementations
pub use async_trait::async_trait;
