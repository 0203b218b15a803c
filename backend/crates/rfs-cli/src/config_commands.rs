use rfs_cli::ServerArgs;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Print the stored config with defaults filled in
    Show {
        /// Fail on an unreadable or malformed config file
        #[arg(long)]
        strict: bool,
    },
    /// Update stored fields; unspecified fields keep their value
    Set(ServerArgs),
}
