//! rfs - RustFS desktop companion CLI
//!
//! Runs the storage server headless with the same supervision the desktop
//! app uses, and inspects or edits its stored configuration.
//!
//! # Examples
//!
//! ```bash
//! # Run in the foreground with a one-off port
//! rfs run --port 9100
//!
//! # Persist a new storage directory
//! rfs config set --storage-path /srv/rustfs
//!
//! # Is anything listening on the configured address?
//! rfs status --pretty
//! ```

mod cli;
mod commands;
mod config_commands;

use crate::{cli::Cli, commands::Commands, config_commands::ConfigCommands};

use rfs_cli::{CliResult, Session};

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match Session::from_env() {
        Ok(session) => dispatch(&session, cli.command).await,
        Err(e) => Err(e),
    };

    match result.and_then(|value| render(&value, cli.pretty)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(session: &Session, command: Commands) -> CliResult<Value> {
    match command {
        Commands::Run { overrides, open } => {
            session
                .run(&overrides, open, async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!("Failed to listen for Ctrl-C: {e}");
                        std::future::pending::<()>().await;
                    }
                })
                .await
        }
        Commands::Status => Ok(session.status().await),
        Commands::CheckPort { host, port } => Ok(session.check_port(&host, port).await),
        Commands::Config { action } => match action {
            ConfigCommands::Show { strict } => session.config_show(strict),
            ConfigCommands::Set(args) => session.config_set(&args),
        },
        Commands::Paths => session.paths(),
    }
}

fn render(value: &Value, pretty: bool) -> CliResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn,rfs_supervisor=info,rustfs=info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
