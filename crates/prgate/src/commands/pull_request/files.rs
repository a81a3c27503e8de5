use async_trait::async_trait;
use clap::Parser;
use prgate_models::RepositoryPath;
use tracing::warn;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List files changed by a pull request
#[derive(Parser)]
pub(crate) struct PullRequestFilesCommand {
    /// Repository path (e.g. 'MyOrganization/my-project')
    repository_path: RepositoryPath,

    /// Pull request number
    number: u64,
}

#[async_trait]
impl Command for PullRequestFilesCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let (owner, name) = self.repository_path.components();
        let api_service = ctx.connector.connect().await?;

        let (files, error) = match api_service.pull_files_list(owner, name, self.number).await {
            Ok(files) => (files, None),
            Err(e) => (
                e.partial_result().map(<[String]>::to_vec).unwrap_or_default(),
                Some(e),
            ),
        };

        let mut writer = ctx.writer.write().await;
        for file in &files {
            writeln!(writer, "{}", file)?;
        }

        match error {
            Some(e) => {
                warn!(count = files.len(), message = "File listing is incomplete");
                Err(e.into())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use prgate_ghapi_interface::{ApiError, MockApiService};
    use pretty_assertions::assert_eq;

    use crate::testutils::{test_command, test_command_error, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let mut api_service = MockApiService::new();
        api_service
            .expect_pull_files_list()
            .withf(|owner, name, number| owner == "owner" && name == "name" && number == &3)
            .returning(|_, _, _| Ok(vec!["new/main.tf".into(), "old/main.tf".into()]));

        assert_eq!(
            test_command(
                CommandContextTest::new().with_api_service(api_service),
                &["pull-requests", "files", "owner/name", "3"]
            )
            .await,
            "new/main.tf\nold/main.tf\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_with_partial_listing() {
        let mut api_service = MockApiService::new();
        api_service.expect_pull_files_list().returning(|_, _, _| {
            Err(ApiError::PartialListing {
                collected: vec!["a.tf".into()],
                source: Box::new(ApiError::ConfigError {
                    message: "boom".into(),
                }),
            })
        });

        assert_eq!(
            test_command_error(
                CommandContextTest::new().with_api_service(api_service),
                &["pull-requests", "files", "owner/name", "3"]
            )
            .await,
            "a.tf\nListing interrupted after 1 entries: Invalid configuration: boom"
        );
    }
}
