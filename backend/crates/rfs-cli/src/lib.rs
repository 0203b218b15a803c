//! rfs-cli library
//!
//! Exports the session the `rfs` binary drives, for use in tests.

pub(crate) mod error;
pub(crate) mod opener;
pub(crate) mod server_args;
pub(crate) mod session;


pub use error::{CliError, Result as CliResult};
pub use opener::SystemOpener;
pub use server_args::ServerArgs;
pub use session::Session;
