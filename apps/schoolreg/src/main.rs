//! SchoolReg binary entry point.

use clap::Parser;
use schoolreg::api::run_server;
use schoolreg::cli::{Cli, CliResult, Command, cmd_init, cmd_list, cmd_status};
use schoolreg::config::ServerConfig;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => match ServerConfig::from_env() {
            Ok(server) => Command::Serve(server),
            Err(e) => e.exit(),
        },
    };

    let result: CliResult = match command {
        Command::Serve(server) => run_server(&cli.storage, &server).await.map_err(Into::into),
        Command::Init { force } => cmd_init(&cli.storage, force),
        Command::List { json } => cmd_list(&cli.storage, json),
        Command::Status { json } => cmd_status(&cli.storage, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "schoolreg failed");
            ExitCode::FAILURE
        }
    }
}
