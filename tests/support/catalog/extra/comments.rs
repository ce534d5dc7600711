//! Seed comments on the welcome post, from a nested catalog directory.

use async_trait::async_trait;
use data_fixtures::{ExecutionContext, Fixture, FixtureId, FixtureResult, register_fixture};

use super::posts::PostsFixture;

/// Inserts a comment referencing the seeded welcome post.
#[derive(Default)]
pub struct CommentsFixture;

#[async_trait]
impl Fixture for CommentsFixture {
	async fn load(&self, context: &ExecutionContext) -> FixtureResult<()> {
		let post = context.reference("post.welcome")?;
		context
			.insert("comments")
			.value("post_id", post)
			.value("body", "First!")
			.execute()
			.await?;
		Ok(())
	}

	fn dependencies(&self) -> Vec<FixtureId> {
		vec![FixtureId::of::<PostsFixture>()]
	}
}

register_fixture!(CommentsFixture);
