//! The `data-fixture` command-line tool.
//!
//! Fixture imports need two things only the embedding application can
//! supply: a live [`PersistenceBackend`] and the application's registered
//! fixture types. This standalone binary therefore runs the import against
//! an in-process backend that renders every statement into an SQL script and
//! prints it on success, which makes it a dry-run inspector for fixture
//! files and the wiring template for an embedded runner.
//!
//! Applications embed the real thing by linking their fixture modules and
//! handing [`cli::run`] their own backend:
//!
//! ```ignore
//! let cli = Cli::parse();
//! let context = ExecutionContext::new(my_backend);
//! if let Err(e) = cli::run(cli, context).await {
//!     eprintln!("Error: {}", e);
//!     std::process::exit(1);
//! }
//! ```

use std::process;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use parking_lot::Mutex;

use data_fixtures::cli::{self, Cli};
use data_fixtures::{
	ExecuteResult, ExecutionContext, FieldValue, FixtureResult, PersistenceBackend,
};

/// Backend that renders every statement into an SQL script.
#[derive(Default)]
struct ScriptBackend {
	lines: Mutex<Vec<String>>,
}

impl ScriptBackend {
	fn script(&self) -> String {
		let lines = self.lines.lock();
		let mut script = lines.join("\n");
		if !script.is_empty() {
			script.push('\n');
		}
		script
	}
}

#[async_trait]
impl PersistenceBackend for ScriptBackend {
	async fn execute(&self, sql: &str, params: Vec<FieldValue>) -> FixtureResult<ExecuteResult> {
		self.lines
			.lock()
			.push(format!("{};", inline_params(sql, &params)));
		Ok(ExecuteResult { rows_affected: 1 })
	}

	async fn begin(&self) -> FixtureResult<()> {
		self.lines.lock().push("BEGIN;".to_string());
		Ok(())
	}

	async fn commit(&self) -> FixtureResult<()> {
		self.lines.lock().push("COMMIT;".to_string());
		Ok(())
	}

	async fn rollback(&self) -> FixtureResult<()> {
		self.lines.lock().push("ROLLBACK;".to_string());
		Ok(())
	}
}

/// Substitutes `$n` placeholders with rendered literals.
fn inline_params(sql: &str, params: &[FieldValue]) -> String {
	let mut rendered = sql.to_string();
	// Highest placeholder first so $1 does not clobber $10
	for (index, value) in params.iter().enumerate().rev() {
		rendered = rendered.replace(&format!("${}", index + 1), &render_literal(value));
	}
	rendered
}

fn render_literal(value: &FieldValue) -> String {
	match value {
		FieldValue::Null => "NULL".to_string(),
		FieldValue::Bool(true) => "TRUE".to_string(),
		FieldValue::Bool(false) => "FALSE".to_string(),
		FieldValue::Int(i) => i.to_string(),
		FieldValue::Float(f) => f.to_string(),
		FieldValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
		FieldValue::Bytes(bytes) => {
			let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
			format!("'\\x{}'", hex)
		}
		FieldValue::Timestamp(ts) => format!("'{}'", ts.to_rfc3339()),
	}
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();

	let backend = Arc::new(ScriptBackend::default());
	let context = ExecutionContext::new(backend.clone());

	match cli::run(cli, context).await {
		Ok(_) => print!("{}", backend.script()),
		Err(e) => {
			eprintln!("Error: {}", e);
			process::exit(1);
		}
	}
}
