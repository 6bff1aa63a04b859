//! `opnsense dhcpv4 ...` handlers.

use opnsense_api::OpnsenseApi;

use crate::cli::{Dhcpv4Args, Dhcpv4Command, Dhcpv4ServiceCommand, GlobalOpts, LeasesCommand};
use crate::error::CliError;

use super::util::emit;

pub async fn handle(
    api: &OpnsenseApi,
    args: Dhcpv4Args,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let dhcpv4 = api.dhcpv4();

    let resp = match args.command {
        Dhcpv4Command::Leases(leases) => match leases.command {
            LeasesCommand::List => dhcpv4.leases().search_lease().await?,
            LeasesCommand::Delete { ip } => dhcpv4.leases().del_lease(&ip).await?,
        },
        Dhcpv4Command::Service(service) => {
            let svc = dhcpv4.service();
            match service.command {
                Dhcpv4ServiceCommand::Status => svc.status().await?,
                Dhcpv4ServiceCommand::Start => svc.start().await?,
                Dhcpv4ServiceCommand::Stop => svc.stop().await?,
                Dhcpv4ServiceCommand::Restart => svc.restart().await?,
                Dhcpv4ServiceCommand::Reconfigure => svc.reconfigure().await?,
            }
        }
    };

    emit(&resp, global)
}
