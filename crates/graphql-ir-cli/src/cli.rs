use clap::CommandFactory;
use crate::commands;
use crate::output_utils;
use crate::CommandResult;

#[derive(clap::Parser, Debug)]
#[command(
    name = "graphql-ir",
    version,
    about = "Builds the model IR of GraphQL operations and fragments.",
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        conflicts_with="verbose",
        help="Only log warnings and errors. Overrides `LOG_LEVEL`.",
        long,
        short='q',
    )]
    pub quiet: bool,

    #[arg(
        action=clap::ArgAction::Count,
        help="Log more detail: once for debug output, twice for trace \
             output. Overrides `LOG_LEVEL`.",
        long,
        short='v',
    )]
    pub verbose: u8,
}
impl Cli {
    /// Without a subcommand there is nothing to build, so point at `build`.
    pub(crate) fn run_default(self) -> CommandResult {
        let help = Self::command().render_help();
        CommandResult::stderr(format_args!(
            "{help}\n{} No command given. To build IR, run \
            `graphql-ir build --schema <SCHEMA_FILE> <FILE_OR_DIR_PATHS>...`.",
            output_utils::RED_X,
        ))
    }
}
