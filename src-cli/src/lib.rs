//! Conecta - command-line shell
//!
//! Drives the same session lifecycle the mobile screens use: bootstrap from
//! the persisted credentials, then run one command against the backend.

mod commands;

use std::process::ExitCode;

use clap::Parser;

use commands::Cli;

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    conecta_core::init_logging();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(commands::dispatch(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
