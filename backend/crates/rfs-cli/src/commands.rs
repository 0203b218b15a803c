use crate::config_commands::ConfigCommands;

use rfs_cli::ServerArgs;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start the server and supervise it until Ctrl-C
    Run {
        #[command(flatten)]
        overrides: ServerArgs,

        /// Open the console in a browser once the server is ready
        #[arg(long)]
        open: bool,
    },

    /// Check whether the configured address is answering
    Status,

    /// Probe a TCP port
    CheckPort {
        host: String,
        port: u16,
    },

    /// Stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show the config file and server executable locations
    Paths,
}
