use async_trait::async_trait;
use clap::Parser;
use prgate_models::RepositoryPath;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Check if the merge button of a pull request is clickable
#[derive(Parser)]
pub(crate) struct PullRequestMergeableCommand {
    /// Repository path (e.g. 'MyOrganization/my-project')
    repository_path: RepositoryPath,

    /// Pull request number
    number: u64,
}

#[async_trait]
impl Command for PullRequestMergeableCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let (owner, name) = self.repository_path.components();
        let api_service = ctx.connector.connect().await?;
        let mergeable = api_service
            .pull_is_mergeable(owner, name, self.number)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Pull request #{} on repository '{}' is {}.",
            self.number,
            self.repository_path,
            if mergeable { "mergeable" } else { "not mergeable" }
        )?;

        Ok(())
    }
}
