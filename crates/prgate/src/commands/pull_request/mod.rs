use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod approved;
mod comment;
mod files;
mod merge;
mod mergeable;
mod show;
mod status;

use self::{
    approved::PullRequestApprovedCommand, comment::PullRequestCommentCommand,
    files::PullRequestFilesCommand, merge::PullRequestMergeCommand,
    mergeable::PullRequestMergeableCommand, show::PullRequestShowCommand,
    status::PullRequestStatusCommand,
};

/// Manage pull requests
#[derive(Parser)]
pub(crate) struct PullRequestCommand {
    #[clap(subcommand)]
    inner: PullRequestSubCommand,
}

#[async_trait]
impl Command for PullRequestCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
pub(crate) enum PullRequestSubCommand {
    Show(PullRequestShowCommand),
    Files(PullRequestFilesCommand),
    Approved(PullRequestApprovedCommand),
    Mergeable(PullRequestMergeableCommand),
    Comment(PullRequestCommentCommand),
    Status(PullRequestStatusCommand),
    Merge(PullRequestMergeCommand),
}

#[async_trait]
impl Command for PullRequestSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Show(sub) => sub.execute(ctx).await,
            Self::Files(sub) => sub.execute(ctx).await,
            Self::Approved(sub) => sub.execute(ctx).await,
            Self::Mergeable(sub) => sub.execute(ctx).await,
            Self::Comment(sub) => sub.execute(ctx).await,
            Self::Status(sub) => sub.execute(ctx).await,
            Self::Merge(sub) => sub.execute(ctx).await,
        }
    }
}
