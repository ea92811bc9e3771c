mod cli;
mod command_result;
mod commands;
mod logging;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command_result::CommandResult;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    for warning in logging::LoggerSettings::from_cli(&cli).init() {
        log::warn!("{warning}");
    }

    let result = match cli.cmd.take() {
        Some(command) => command.run(cli).await,
        None => cli.run_default(),
    };
    if let Some(stdout) = result.stdout {
        println!("{stdout}");
    }
    if let Some(stderr) = result.stderr {
        eprintln!("{stderr}");
    }
    result.exit_code
}
