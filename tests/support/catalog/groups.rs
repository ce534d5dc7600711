//! Seed groups, independent of every other fixture.

use async_trait::async_trait;
use data_fixtures::{ExecutionContext, Fixture, FixtureResult, register_fixture};

/// Inserts the default group.
#[derive(Default)]
pub struct GroupsFixture;

#[async_trait]
impl Fixture for GroupsFixture {
	async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
		context
			.insert("groups")
			.value("name", "editors")
			.execute()
			.await?;
		Ok(())
	}
}

register_fixture!(GroupsFixture);
