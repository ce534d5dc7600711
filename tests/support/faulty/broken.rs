//! Fixture whose target table the failure-injection tests rig to error.

use async_trait::async_trait;
use data_fixtures::{ExecutionContext, Fixture, FixtureResult, register_fixture};

/// Inserts into `broken_rows`, the table tests instruct the backend to
/// reject.
#[derive(Default)]
pub struct BrokenRowsFixture;

#[async_trait]
impl Fixture for BrokenRowsFixture {
	async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
		context
			.insert("broken_rows")
			.value("label", "doomed")
			.execute()
			.await?;
		Ok(())
	}
}

register_fixture!(BrokenRowsFixture);
