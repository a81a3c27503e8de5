use async_trait::async_trait;
use clap::Parser;
use prgate_models::{CommitStatus, PullRequestHandle, RepositoryPath};
use tracing::debug;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Set a commit status on the current head of a pull request
#[derive(Parser)]
pub(crate) struct PullRequestStatusCommand {
    /// Repository path (e.g. 'MyOrganization/my-project')
    repository_path: RepositoryPath,

    /// Pull request number
    number: u64,

    /// Status (pending, success, failed, errored)
    status: CommitStatus,

    /// Status context
    #[clap(long, default_value = "prgate")]
    context: String,

    /// Status description
    #[clap(long, default_value = "")]
    description: String,

    /// Status target URL
    #[clap(long, default_value = "")]
    target_url: String,
}

#[async_trait]
impl Command for PullRequestStatusCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let api_service = ctx.connector.connect().await?;

        // The head moves on every push, fetch it right before writing.
        let (owner, name) = self.repository_path.components();
        let upstream_pr = api_service.pulls_get(owner, name, self.number).await?;
        let handle = PullRequestHandle::new(self.repository_path.clone(), self.number)
            .with_head_sha(upstream_pr.head.sha);
        debug!(
            handle = %handle,
            head_sha = handle.head_sha(),
            message = "Refreshed pull request head"
        );

        api_service
            .commit_statuses_update(
                handle.owner(),
                handle.name(),
                handle.head_sha(),
                self.status,
                &self.context,
                &self.description,
                &self.target_url,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Status '{}' set on commit {} of pull request #{} on repository '{}'.",
            self.status,
            handle.head_sha(),
            self.number,
            self.repository_path
        )?;

        Ok(())
    }
}
