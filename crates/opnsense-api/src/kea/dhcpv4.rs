// Kea DHCPv4 server endpoints
//
// General settings, subnets, reservations (including CSV import/export)
// and HA peers. Bodies follow the `KeaDhcpv4.xml` model and are passed
// through untouched. Mutations are staged on the firewall: callers apply
// them with `set` and then `kea/service/reconfigure`.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::Payload;
use crate::client::OpnClient;
use crate::error::Error;

/// Client for `kea/dhcpv4/*`.
#[derive(Debug)]
pub struct KeaDhcpv4Client {
    client: Arc<OpnClient>,
}

impl KeaDhcpv4Client {
    pub(crate) fn new(client: Arc<OpnClient>) -> Self {
        Self { client }
    }

    // ── General ──────────────────────────────────────────────────────

    /// Get the DHCPv4 server configuration.
    ///
    /// `GET /api/kea/dhcpv4/get`
    pub async fn get(&self) -> Result<Value, Error> {
        debug!("fetching kea dhcpv4 config");
        self.client.get_json("kea/dhcpv4/get").await
    }

    /// Set the DHCPv4 server configuration.
    ///
    /// `POST /api/kea/dhcpv4/set`
    ///
    /// An empty payload is accepted by the firewall and is enough to apply
    /// staged subnet/reservation/peer changes.
    pub async fn set(&self, data: &Payload) -> Result<Value, Error> {
        debug!("updating kea dhcpv4 config");
        self.client.post_json("kea/dhcpv4/set", data).await
    }

    // ── Subnets ──────────────────────────────────────────────────────

    /// `POST /api/kea/dhcpv4/addSubnet` with a `{"subnet4": {...}}` body.
    pub async fn add_subnet(&self, data: &Payload) -> Result<Value, Error> {
        debug!("adding subnet");
        self.client.post_json("kea/dhcpv4/addSubnet", data).await
    }

    /// `POST /api/kea/dhcpv4/delSubnet/{uuid}`
    pub async fn del_subnet(&self, uuid: &str) -> Result<Value, Error> {
        debug!(uuid, "deleting subnet");
        self.client
            .post_empty(&format!("kea/dhcpv4/delSubnet/{uuid}"))
            .await
    }

    /// `GET /api/kea/dhcpv4/getSubnet/{uuid}`
    pub async fn get_subnet(&self, uuid: &str) -> Result<Value, Error> {
        self.client
            .get_json(&format!("kea/dhcpv4/getSubnet/{uuid}"))
            .await
    }

    /// `GET /api/kea/dhcpv4/searchSubnet`
    pub async fn search_subnet(&self) -> Result<Value, Error> {
        debug!("listing subnets");
        self.client.get_json("kea/dhcpv4/searchSubnet").await
    }

    /// `POST /api/kea/dhcpv4/setSubnet/{uuid}` with a `{"subnet4": {...}}` body.
    pub async fn set_subnet(&self, uuid: &str, data: &Payload) -> Result<Value, Error> {
        debug!(uuid, "updating subnet");
        self.client
            .post_json(&format!("kea/dhcpv4/setSubnet/{uuid}"), data)
            .await
    }

    // ── Reservations ─────────────────────────────────────────────────

    /// `GET /api/kea/dhcpv4/searchReservation`
    pub async fn search_reservation(&self) -> Result<Value, Error> {
        debug!("listing reservations");
        self.client.get_json("kea/dhcpv4/searchReservation").await
    }

    /// Add a reservation.
    ///
    /// `POST /api/kea/dhcpv4/addReservation`
    ///
    /// ```json
    /// {"reservation": {"hw_address": "02:42:46:e2:c3:ac", "ip_address": "192.168.199.200",
    ///                  "hostname": "test.local", "subnet": "<subnet uuid>"}}
    /// ```
    pub async fn add_reservation(&self, data: &Payload) -> Result<Value, Error> {
        debug!("adding reservation");
        self.client
            .post_json("kea/dhcpv4/addReservation", data)
            .await
    }

    /// `POST /api/kea/dhcpv4/delReservation/{uuid}`
    pub async fn del_reservation(&self, uuid: &str) -> Result<Value, Error> {
        debug!(uuid, "deleting reservation");
        self.client
            .post_empty(&format!("kea/dhcpv4/delReservation/{uuid}"))
            .await
    }

    /// Export all reservations as CSV.
    ///
    /// `GET /api/kea/dhcpv4/downloadReservations`
    ///
    /// The body is returned verbatim, not parsed.
    pub async fn download_reservations(&self) -> Result<String, Error> {
        debug!("downloading reservations");
        self.client
            .get_text("kea/dhcpv4/downloadReservations")
            .await
    }

    /// `GET /api/kea/dhcpv4/getReservation/{uuid}`
    pub async fn get_reservation(&self, uuid: &str) -> Result<Value, Error> {
        self.client
            .get_json(&format!("kea/dhcpv4/getReservation/{uuid}"))
            .await
    }

    /// `POST /api/kea/dhcpv4/setReservation/{uuid}`
    pub async fn set_reservation(&self, uuid: &str, data: &Payload) -> Result<Value, Error> {
        debug!(uuid, "updating reservation");
        self.client
            .post_json(&format!("kea/dhcpv4/setReservation/{uuid}"), data)
            .await
    }

    /// Bulk-import reservations from CSV.
    ///
    /// `POST /api/kea/dhcpv4/uploadReservations`
    ///
    /// Exactly one of `file_path` (multipart upload) or `data` (raw CSV
    /// body) must be given; an empty string counts as absent. Anything
    /// else fails with [`Error::Usage`] before a request is made.
    ///
    /// ```csv
    /// ip_address,hw_address,hostname,description
    /// 192.168.199.69,02:42:46:e2:c3:a6,blah.local,"VMID Blah"
    /// ```
    pub async fn upload_reservations(
        &self,
        file_path: Option<&Path>,
        data: Option<&str>,
    ) -> Result<Value, Error> {
        const PATH: &str = "kea/dhcpv4/uploadReservations";

        let file_path = file_path.filter(|p| !p.as_os_str().is_empty());
        let data = data.filter(|d| !d.is_empty());
        match (file_path, data) {
            (Some(_), Some(_)) => Err(Error::usage(
                "provide either a CSV file path or CSV data, but not both",
            )),
            (None, None) => Err(Error::usage("a CSV file path or CSV data is required")),
            (Some(file_path), None) => {
                debug!(path = %file_path.display(), "uploading reservations from file");
                self.client.post_file(PATH, file_path).await
            }
            (None, Some(data)) => {
                debug!("uploading reservations from CSV data");
                self.client.post_csv(PATH, data).await
            }
        }
    }

    // ── HA peers ─────────────────────────────────────────────────────

    /// `GET /api/kea/dhcpv4/searchPeer`
    pub async fn search_peer(&self) -> Result<Value, Error> {
        debug!("listing peers");
        self.client.get_json("kea/dhcpv4/searchPeer").await
    }

    /// `GET /api/kea/dhcpv4/getPeer/{uuid}`
    pub async fn get_peer(&self, uuid: &str) -> Result<Value, Error> {
        self.client
            .get_json(&format!("kea/dhcpv4/getPeer/{uuid}"))
            .await
    }

    /// `POST /api/kea/dhcpv4/delPeer/{uuid}`
    pub async fn del_peer(&self, uuid: &str) -> Result<Value, Error> {
        debug!(uuid, "deleting peer");
        self.client
            .post_empty(&format!("kea/dhcpv4/delPeer/{uuid}"))
            .await
    }

    /// Add an HA peer.
    ///
    /// `POST /api/kea/dhcpv4/addPeer` with
    /// `{"peer": {"name": "...", "role": "primary" | "standby", "url": "http://..."}}`.
    pub async fn add_peer(&self, data: &Payload) -> Result<Value, Error> {
        debug!("adding peer");
        self.client.post_json("kea/dhcpv4/addPeer", data).await
    }

    /// `POST /api/kea/dhcpv4/setPeer/{uuid}`
    pub async fn set_peer(&self, uuid: &str, data: &Payload) -> Result<Value, Error> {
        debug!(uuid, "updating peer");
        self.client
            .post_json(&format!("kea/dhcpv4/setPeer/{uuid}"), data)
            .await
    }
}
