use std::sync::Arc;

use clap::Parser;
use prgate_config::Config;
use tokio::sync::RwLock;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    connector::GitHubConnector,
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

impl Args {
    /// Check if the command talks to the API with configured credentials.
    pub fn requires_credentials(&self) -> bool {
        self.cmd.requires_credentials()
    }
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let ctx = CommandContext {
            connector: Box::new(GitHubConnector::new(config)),
            writer: Arc::new(RwLock::new(std::io::stdout())),
        };

        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(Self::parse_args_async(args, ctx))
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
