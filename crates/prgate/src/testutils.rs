use std::{io::Write, sync::Arc};

use clap::Parser;
use prgate_ghapi_interface::{ApiService, MockApiService};
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
    connector::MockApiConnector,
};

pub(crate) struct CommandContextTest {
    pub connector: MockApiConnector,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self {
            connector: MockApiConnector::new(),
        }
    }

    /// Hand out an API service on connection.
    pub fn with_api_service(mut self, api_service: MockApiService) -> Self {
        self.connector
            .expect_connect()
            .times(1)
            .return_once(move || Ok(Box::new(api_service) as Box<dyn ApiService>));
        self
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            connector: Box::new(self.connector),
            writer,
        }
    }
}

fn build_args(command_args: &[&str]) -> Args {
    let command_args = {
        let mut tmp_args = vec!["prgate"];
        tmp_args.extend(command_args);
        tmp_args
    };

    match Args::try_parse_from(command_args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            panic!("Parse error.")
        }
    }
}

async fn run_command(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> (String, crate::Result<()>) {
    let buf = Arc::new(RwLock::new(Vec::new()));
    let args = build_args(command_args);
    let result = CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await;

    let vec = buf.read().await.to_vec();
    (std::str::from_utf8(&vec).unwrap().to_string(), result)
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (output, result) = run_command(ctx, command_args).await;
    result.unwrap();
    output
}

/// Run a command expected to fail, returning its output followed by the error.
pub(crate) async fn test_command_error(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (output, result) = run_command(ctx, command_args).await;
    let error = result.expect_err("command should fail");
    format!("{output}{error}")
}
