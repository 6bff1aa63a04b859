//! `opnsense kea ...` handlers.

use tracing::info;

use opnsense_api::OpnsenseApi;
use opnsense_api::kea::KeaDhcpv4Client;

use crate::cli::{
    CrudCommand, GlobalOpts, KeaArgs, KeaCommand, KeaServiceCommand, ReservationsCommand,
    SettingsCommand,
};
use crate::error::CliError;
use crate::output;

use super::util::{emit, read_payload};

pub async fn handle(api: &OpnsenseApi, args: KeaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let kea = api.kea();

    match args.command {
        KeaCommand::CtrlAgent(settings) => {
            let agent = kea.ctrl_agent();
            let resp = match settings.command {
                SettingsCommand::Get => agent.get().await?,
                SettingsCommand::Set { payload } => agent.set(&read_payload(&payload)?).await?,
            };
            emit(&resp, global)
        }

        KeaCommand::Dhcpv4(settings) => {
            let dhcpv4 = kea.dhcpv4();
            let resp = match settings.command {
                SettingsCommand::Get => dhcpv4.get().await?,
                SettingsCommand::Set { payload } => dhcpv4.set(&read_payload(&payload)?).await?,
            };
            emit(&resp, global)
        }

        KeaCommand::Subnets(crud) => {
            let dhcpv4 = kea.dhcpv4();
            let resp = match crud.command {
                CrudCommand::List => dhcpv4.search_subnet().await?,
                CrudCommand::Get { uuid } => dhcpv4.get_subnet(&uuid).await?,
                CrudCommand::Add { payload } => dhcpv4.add_subnet(&read_payload(&payload)?).await?,
                CrudCommand::Set { uuid, payload } => {
                    dhcpv4.set_subnet(&uuid, &read_payload(&payload)?).await?
                }
                CrudCommand::Delete { uuid } => dhcpv4.del_subnet(&uuid).await?,
            };
            emit(&resp, global)
        }

        KeaCommand::Reservations(res) => reservations(kea.dhcpv4(), res.command, global).await,

        KeaCommand::Peers(crud) => {
            let dhcpv4 = kea.dhcpv4();
            let resp = match crud.command {
                CrudCommand::List => dhcpv4.search_peer().await?,
                CrudCommand::Get { uuid } => dhcpv4.get_peer(&uuid).await?,
                CrudCommand::Add { payload } => dhcpv4.add_peer(&read_payload(&payload)?).await?,
                CrudCommand::Set { uuid, payload } => {
                    dhcpv4.set_peer(&uuid, &read_payload(&payload)?).await?
                }
                CrudCommand::Delete { uuid } => dhcpv4.del_peer(&uuid).await?,
            };
            emit(&resp, global)
        }

        KeaCommand::Service(service) => {
            let resp = match service.command {
                KeaServiceCommand::Status => kea.service().status().await?,
                KeaServiceCommand::Reconfigure => kea.service().reconfigure().await?,
            };
            emit(&resp, global)
        }
    }
}

async fn reservations(
    dhcpv4: &KeaDhcpv4Client,
    command: ReservationsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resp = match command {
        ReservationsCommand::Crud(CrudCommand::List) => dhcpv4.search_reservation().await?,
        ReservationsCommand::Crud(CrudCommand::Get { uuid }) => dhcpv4.get_reservation(&uuid).await?,
        ReservationsCommand::Crud(CrudCommand::Add { payload }) => {
            dhcpv4.add_reservation(&read_payload(&payload)?).await?
        }
        ReservationsCommand::Crud(CrudCommand::Set { uuid, payload }) => {
            dhcpv4.set_reservation(&uuid, &read_payload(&payload)?).await?
        }
        ReservationsCommand::Crud(CrudCommand::Delete { uuid }) => {
            dhcpv4.del_reservation(&uuid).await?
        }
        ReservationsCommand::Download { out } => {
            let csv = dhcpv4.download_reservations().await?;
            match out {
                Some(path) => {
                    std::fs::write(&path, csv).map_err(|err| CliError::Io {
                        path: path.display().to_string(),
                        source: err,
                    })?;
                    info!(path = %path.display(), "reservations written");
                }
                None => output::print_raw(&csv, global.quiet),
            }
            return Ok(());
        }
        ReservationsCommand::Upload { file, data } => {
            dhcpv4
                .upload_reservations(file.as_deref(), data.as_deref())
                .await?
        }
    };
    emit(&resp, global)
}
