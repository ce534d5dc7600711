//! Shared support for the import pipeline integration tests.
//!
//! The catalog modules are real fixture source files: each registers its
//! fixture for path-based discovery, so tests can load them through the same
//! file and directory entry points an application would use.

use std::path::PathBuf;

use data_fixtures::{StaticSchemaProvider, TableInfo};

#[path = "catalog/users.rs"]
pub mod users;

#[path = "catalog/groups.rs"]
pub mod groups;

#[path = "catalog/posts.rs"]
pub mod posts;

#[path = "catalog/extra/comments.rs"]
pub mod comments;

#[path = "faulty/broken.rs"]
pub mod broken;

/// Path to the on-disk fixture catalog.
pub fn catalog_dir() -> PathBuf {
	PathBuf::from("tests/support/catalog")
}

/// Path to the deliberately failing fixture.
pub fn faulty_dir() -> PathBuf {
	PathBuf::from("tests/support/faulty")
}

/// Schema for the catalog tables, children declared after their parents.
pub fn catalog_schema() -> StaticSchemaProvider {
	StaticSchemaProvider::new(vec![
		TableInfo::new("users"),
		TableInfo::new("groups"),
		TableInfo::new("posts").with_dependency("users"),
		TableInfo::new("comments").with_dependency("posts"),
	])
}
