use async_trait::async_trait;
use clap::Parser;
use prgate_models::RepositoryPath;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Merge a pull request with a merge method allowed by the repository
#[derive(Parser)]
pub(crate) struct PullRequestMergeCommand {
    /// Repository path (e.g. 'MyOrganization/my-project')
    repository_path: RepositoryPath,

    /// Pull request number
    number: u64,
}

#[async_trait]
impl Command for PullRequestMergeCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let (owner, name) = self.repository_path.components();
        let api_service = ctx.connector.connect().await?;
        api_service.pulls_merge(owner, name, self.number).await?;

        writeln!(
            ctx.writer.write().await,
            "Pull request #{} on repository '{}' merged.",
            self.number,
            self.repository_path
        )?;

        Ok(())
    }
}
