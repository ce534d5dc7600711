//! Import configuration: defaults, TOML file, environment overrides.
//!
//! Resolution order is defaults, then the optional TOML file, then
//! `DATA_FIXTURES_*` environment variables. The environment always wins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, FixtureResult};
use crate::purger::PurgeMode;
use crate::schema::TableInfo;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DATA_FIXTURES_";

/// Configuration file probed in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "data-fixtures.toml";

/// A table the purger may empty, declared in configuration.
///
/// `depends_on` names the tables this table's foreign keys point at, so the
/// purger can empty children before parents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
	/// Table name as known to the database.
	pub name: String,

	/// Tables that must outlive this one's rows.
	#[serde(default)]
	pub depends_on: Vec<String>,
}

/// Configuration for the import command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
	/// Directories loaded when no explicit fixture path is given.
	pub fixture_paths: Vec<PathBuf>,

	/// Purge strategy for non-append runs.
	pub purge_mode: PurgeMode,

	/// Whether the run executes inside one transaction.
	pub transactional: bool,

	/// Whether truncate statements append `CASCADE`.
	pub truncate_cascade: bool,

	/// Tables the purger empties, as `[[tables]]` entries.
	pub tables: Vec<TableConfig>,
}

impl Default for ImportConfig {
	fn default() -> Self {
		Self {
			fixture_paths: vec![PathBuf::from("fixtures")],
			purge_mode: PurgeMode::default(),
			transactional: true,
			truncate_cascade: false,
			tables: Vec::new(),
		}
	}
}

impl ImportConfig {
	/// Reads configuration from a TOML file.
	///
	/// Missing keys fall back to their defaults.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::Config`] if the file cannot be read or
	/// parsed.
	pub fn from_toml_file<P: AsRef<Path>>(path: P) -> FixtureResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| {
			FixtureError::Config(format!("Failed to read {}: {}", path.display(), e))
		})?;
		toml::from_str(&content).map_err(|e| {
			FixtureError::Config(format!("Failed to parse {}: {}", path.display(), e))
		})
	}

	/// Applies `DATA_FIXTURES_*` environment overrides.
	///
	/// Recognized variables:
	///
	/// - `DATA_FIXTURES_PATHS` - comma-separated directory list
	/// - `DATA_FIXTURES_PURGE_MODE` - `delete` or `truncate`
	/// - `DATA_FIXTURES_TRANSACTIONAL` - boolean
	/// - `DATA_FIXTURES_TRUNCATE_CASCADE` - boolean
	pub fn overlay_env(mut self) -> FixtureResult<Self> {
		if let Ok(value) = std::env::var(format!("{}PATHS", ENV_PREFIX)) {
			self.fixture_paths = parse_list(&value).into_iter().map(PathBuf::from).collect();
		}
		if let Ok(value) = std::env::var(format!("{}PURGE_MODE", ENV_PREFIX)) {
			self.purge_mode = match value.to_ascii_lowercase().as_str() {
				"delete" => PurgeMode::Delete,
				"truncate" => PurgeMode::Truncate,
				_ => {
					return Err(FixtureError::Config(format!(
						"Invalid purge mode: {}",
						value
					)));
				}
			};
		}
		if let Ok(value) = std::env::var(format!("{}TRANSACTIONAL", ENV_PREFIX)) {
			self.transactional = parse_bool(&value).map_err(FixtureError::Config)?;
		}
		if let Ok(value) = std::env::var(format!("{}TRUNCATE_CASCADE", ENV_PREFIX)) {
			self.truncate_cascade = parse_bool(&value).map_err(FixtureError::Config)?;
		}
		Ok(self)
	}

	/// Resolves the effective configuration for a run.
	///
	/// An explicitly given file must load. Without one,
	/// [`DEFAULT_CONFIG_FILE`] in the working directory is read when
	/// present, and pure defaults are used when not. Environment overrides
	/// apply last in every case.
	pub fn resolve(config_file: Option<&Path>) -> FixtureResult<Self> {
		let base = match config_file {
			Some(path) => Self::from_toml_file(path)?,
			None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
				Self::from_toml_file(DEFAULT_CONFIG_FILE)?
			}
			None => Self::default(),
		};
		base.overlay_env()
	}

	/// Table metadata for the purger, in declaration order.
	pub fn schema_tables(&self) -> Vec<TableInfo> {
		self.tables
			.iter()
			.map(|table| {
				let mut info = TableInfo::new(&table.name);
				for dependency in &table.depends_on {
					info = info.with_dependency(dependency);
				}
				info
			})
			.collect()
	}
}

/// Parses a boolean environment value.
///
/// Accepts `1`/`true`/`yes`/`on` and `0`/`false`/`no`/`off`, case
/// insensitive.
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(format!("Invalid boolean value: {}", value)),
	}
}

/// Splits a comma-separated environment value, dropping empty entries.
pub fn parse_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(ToString::to_string)
		.collect()
}
