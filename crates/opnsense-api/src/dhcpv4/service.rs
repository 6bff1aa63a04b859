// ISC DHCPv4 service control
//
// Start/stop/restart/status plus `reconfigure`, which regenerates the
// daemon configuration from the staged settings.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::client::OpnClient;
use crate::error::Error;

/// Client for `dhcpv4/service/*`.
#[derive(Debug)]
pub struct Dhcpv4ServiceClient {
    client: Arc<OpnClient>,
}

impl Dhcpv4ServiceClient {
    pub(crate) fn new(client: Arc<OpnClient>) -> Self {
        Self { client }
    }

    /// `GET /api/dhcpv4/service/status`
    pub async fn status(&self) -> Result<Value, Error> {
        self.client.get_json("dhcpv4/service/status").await
    }

    /// `POST /api/dhcpv4/service/start`
    pub async fn start(&self) -> Result<Value, Error> {
        self.action("start").await
    }

    /// `POST /api/dhcpv4/service/stop`
    pub async fn stop(&self) -> Result<Value, Error> {
        self.action("stop").await
    }

    /// `POST /api/dhcpv4/service/restart`
    pub async fn restart(&self) -> Result<Value, Error> {
        self.action("restart").await
    }

    /// `POST /api/dhcpv4/service/reconfigure`
    pub async fn reconfigure(&self) -> Result<Value, Error> {
        self.action("reconfigure").await
    }

    async fn action(&self, name: &str) -> Result<Value, Error> {
        debug!(action = name, "dhcpv4 service action");
        self.client
            .post_empty(&format!("dhcpv4/service/{name}"))
            .await
    }
}
