//! Command dispatch: bridges CLI args -> API namespaces -> output formatting.

pub mod dhcpv4;
pub mod kea;
pub mod util;

use opnsense_api::OpnsenseApi;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a firewall-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, api: &OpnsenseApi, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Kea(args) => kea::handle(api, args, global).await,
        Command::Dhcpv4(args) => dhcpv4::handle(api, args, global).await,
        // Completions are handled before a client is built
        Command::Completions(_) => Ok(()),
    }
}
