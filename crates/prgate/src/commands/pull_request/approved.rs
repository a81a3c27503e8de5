use async_trait::async_trait;
use clap::Parser;
use prgate_models::RepositoryPath;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Check if a pull request has an approving review
#[derive(Parser)]
pub(crate) struct PullRequestApprovedCommand {
    /// Repository path (e.g. 'MyOrganization/my-project')
    repository_path: RepositoryPath,

    /// Pull request number
    number: u64,
}

#[async_trait]
impl Command for PullRequestApprovedCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let (owner, name) = self.repository_path.components();
        let api_service = ctx.connector.connect().await?;
        let approved = api_service
            .pull_is_approved(owner, name, self.number)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Pull request #{} on repository '{}' is {}.",
            self.number,
            self.repository_path,
            if approved { "approved" } else { "not approved" }
        )?;

        Ok(())
    }
}
