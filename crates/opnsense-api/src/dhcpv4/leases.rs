use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::client::OpnClient;
use crate::error::Error;

/// Client for `dhcpv4/leases/*`.
#[derive(Debug)]
pub struct LeasesClient {
    client: Arc<OpnClient>,
}

impl LeasesClient {
    pub(crate) fn new(client: Arc<OpnClient>) -> Self {
        Self { client }
    }

    /// List active and static leases.
    ///
    /// `GET /api/dhcpv4/leases/searchLease`
    pub async fn search_lease(&self) -> Result<Value, Error> {
        debug!("listing dhcpv4 leases");
        self.client.get_json("dhcpv4/leases/searchLease").await
    }

    /// Remove the lease for an IP address.
    ///
    /// `POST /api/dhcpv4/leases/delLease/{ip}`
    pub async fn del_lease(&self, ip: &str) -> Result<Value, Error> {
        debug!(ip, "deleting dhcpv4 lease");
        self.client
            .post_empty(&format!("dhcpv4/leases/delLease/{ip}"))
            .await
    }
}
