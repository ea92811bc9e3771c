mod build;

use crate::Cli;
use crate::CommandResult;
use build::BuildCmd;

/// A subcommand that runs to completion and reports through a
/// [`CommandResult`].
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum CommandEnum {
    /// Build the IR of every operation and fragment and print it as JSON.
    Build(Box<BuildCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Build(cmd) => cmd.run(cli).await,
        }
    }
}
