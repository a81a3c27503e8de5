use async_trait::async_trait;
use clap::Parser;
use prgate_ghapi_github::AppRegistration;
use tracing::info;

use super::{Command, CommandContext};
use crate::Result;

/// Exchange the code received at the end of a manifest flow for app credentials
#[derive(Parser)]
pub(crate) struct AppExchangeCodeCommand {
    /// Code query parameter of the manifest flow callback
    code: String,
}

#[async_trait]
impl Command for AppExchangeCodeCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let conversion = ctx.connector.exchange_manifest_code(&self.code).await?;
        info!(
            app_id = conversion.id,
            app_name = %conversion.name,
            message = "GitHub App registered"
        );

        let registration = AppRegistration::from(conversion);
        writeln!(
            ctx.writer.write().await,
            "{}",
            serde_json::to_string_pretty(&registration)?
        )?;

        Ok(())
    }
}
