//! Seed posts, authored by the seeded admin user.

use async_trait::async_trait;
use data_fixtures::{ExecutionContext, Fixture, FixtureId, FixtureResult, register_fixture};

use super::users::UsersFixture;

/// Inserts the welcome post and publishes its row id.
#[derive(Default)]
pub struct PostsFixture;

#[async_trait]
impl Fixture for PostsFixture {
	async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
		let author = context.reference("user.admin")?;
		context
			.insert("posts")
			.value("title", "Welcome")
			.value("author_id", author)
			.execute()
			.await?;

		context.set_reference("post.welcome", 10i64);
		Ok(())
	}

	fn dependencies(&self) -> Vec<FixtureId> {
		vec![FixtureId::of::<UsersFixture>()]
	}
}

register_fixture!(PostsFixture);
