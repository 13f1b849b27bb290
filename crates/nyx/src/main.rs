//! Nyx CLI — wires the parsed command line onto the release pipeline core.

use clap::Parser;
use nyx_core::CoreError;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = cli::Cli::parse();
    match commands::run(cli) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            tracing::error!(error = %err, "nyx failed");
            eprintln!("error: {err}");
            std::process::exit(exit_code(&err));
        }
    }
}

/// Maps a [`CoreError`] to the process exit code spec'd for the CLI:
/// 0 success, 1 configuration error, 2 Git error, 3 release error, 4
/// transport/auth error.
fn exit_code(err: &CoreError) -> i32 {
    match err {
        CoreError::Config(_) | CoreError::DataAccess(_) => 1,
        CoreError::Git(_) => 2,
        CoreError::Release(_) | CoreError::Version(_) | CoreError::Convention(_) | CoreError::Template(_) => 3,
        CoreError::Service(_) => 4,
    }
}
