use std::path::PathBuf;

use async_trait::async_trait;
use clap::Parser;
use prgate_models::RepositoryPath;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Post a comment on a pull request, split in several comments if too long
#[derive(Parser)]
pub(crate) struct PullRequestCommentCommand {
    /// Repository path (e.g. 'MyOrganization/my-project')
    repository_path: RepositoryPath,

    /// Pull request number
    number: u64,

    /// Comment body
    #[clap(required_unless_present = "file", conflicts_with = "file")]
    body: Option<String>,

    /// Read comment body from a file
    #[clap(long)]
    file: Option<PathBuf>,
}

#[async_trait]
impl Command for PullRequestCommentCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let body = match (self.body, self.file) {
            (Some(body), _) => body,
            (None, Some(file)) => tokio::fs::read_to_string(file).await?,
            (None, None) => String::new(),
        };

        let (owner, name) = self.repository_path.components();
        let api_service = ctx.connector.connect().await?;
        api_service
            .comments_post(owner, name, self.number, &body)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Comment posted on pull request #{} on repository '{}'.",
            self.number,
            self.repository_path
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use prgate_ghapi_interface::MockApiService;
    use pretty_assertions::assert_eq;

    use crate::testutils::{test_command, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let mut api_service = MockApiService::new();
        api_service
            .expect_comments_post()
            .withf(|owner, name, number, body| {
                owner == "owner" && name == "name" && number == &2 && body == "Plan succeeded"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        assert_eq!(
            test_command(
                CommandContextTest::new().with_api_service(api_service),
                &["pull-requests", "comment", "owner/name", "2", "Plan succeeded"]
            )
            .await,
            "Comment posted on pull request #2 on repository 'owner/name'.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_from_file() -> Result<(), Box<dyn Error>> {
        let path = std::env::temp_dir().join(format!("prgate-comment-{}.md", std::process::id()));
        std::fs::write(&path, "line 1\nline 2\n")?;

        let mut api_service = MockApiService::new();
        api_service
            .expect_comments_post()
            .withf(|_, _, _, body| body == "line 1\nline 2\n")
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let output = test_command(
            CommandContextTest::new().with_api_service(api_service),
            &[
                "pull-requests",
                "comment",
                "owner/name",
                "2",
                "--file",
                path.to_str().unwrap(),
            ],
        )
        .await;
        std::fs::remove_file(&path)?;

        assert_eq!(
            output,
            "Comment posted on pull request #2 on repository 'owner/name'.\n"
        );

        Ok(())
    }
}
