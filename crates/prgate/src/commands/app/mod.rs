//! GitHub App commands.

mod exchange_code;

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use self::exchange_code::AppExchangeCodeCommand;
use super::{Command, CommandContext};
use crate::Result;

/// GitHub App registration
#[derive(Parser)]
pub(crate) struct AppCommand {
    #[clap(subcommand)]
    inner: AppSubCommand,
}

#[async_trait]
impl Command for AppCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum AppSubCommand {
    ExchangeCode(AppExchangeCodeCommand),
}

#[async_trait]
impl Command for AppSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::ExchangeCode(sub) => sub.execute(ctx).await,
        }
    }
}
