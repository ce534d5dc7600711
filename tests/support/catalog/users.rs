//! Seed users for the integration catalog.

use async_trait::async_trait;
use data_fixtures::{ExecutionContext, Fixture, FixtureResult, register_fixture};

/// Inserts the seed users and publishes the admin's row id.
#[derive(Default)]
pub struct UsersFixture;

#[async_trait]
impl Fixture for UsersFixture {
	async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
		context
			.insert("users")
			.value("username", "admin")
			.value("is_active", true)
			.execute()
			.await?;
		context
			.insert("users")
			.value("username", "reader")
			.value("is_active", false)
			.execute()
			.await?;

		context.set_reference("user.admin", 1i64);
		Ok(())
	}
}

register_fixture!(UsersFixture);
