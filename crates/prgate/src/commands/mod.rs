//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use tokio::sync::RwLock;

use self::{app::AppCommand, pull_request::PullRequestCommand, utils::UtilsCommand};
use crate::{connector::ApiConnector, Result};

mod app;
mod pull_request;
mod utils;

pub(crate) struct CommandContext {
    pub connector: Box<dyn ApiConnector>,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    PullRequests(PullRequestCommand),
    App(AppCommand),
    Utils(UtilsCommand),
}

impl SubCommand {
    pub fn requires_credentials(&self) -> bool {
        matches!(self, Self::PullRequests(_))
    }
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::PullRequests(sub) => sub.execute(ctx).await,
            Self::App(sub) => sub.execute(ctx).await,
            Self::Utils(sub) => sub.execute(ctx).await,
        }
    }
}
