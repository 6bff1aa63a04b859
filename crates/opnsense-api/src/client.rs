// OPNsense HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, Basic authentication and
// uniform response handling. Every endpoint wrapper (kea/*, dhcpv4/*) holds
// an `Arc<OpnClient>` and issues its requests through the primitives here.

use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::Payload;
use crate::credentials::Credentials;
use crate::error::Error;

/// Authenticated HTTP client bound to one OPNsense `/api` base URL.
///
/// Immutable once built: a credential change produces a new `OpnClient`
/// rather than mutating this one.
#[derive(Debug)]
pub struct OpnClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    timeout_secs: u64,
}

impl OpnClient {
    /// Bind a pre-built `reqwest::Client` to a normalized base URL.
    ///
    /// `timeout_secs` is only used to report [`Error::Timeout`]; the
    /// actual deadline lives in the `reqwest::Client`.
    pub fn new(
        http: reqwest::Client,
        base_url: Url,
        credentials: Credentials,
        timeout_secs: u64,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
            timeout_secs,
        }
    }

    /// The `/api` base URL every path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credentials sent with every request.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `{base_url}/{path}`, e.g. `https://fw/api` + `kea/service/status`.
    fn url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// GET and parse the body as JSON.
    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.send(self.http.get(url)).await?;
        self.handle_json(resp).await
    }

    /// GET and return the body as text (CSV downloads).
    pub(crate) async fn get_text(&self, path: &str) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("GET {url} (raw)");

        let resp = self.send(self.http.get(url)).await?;
        resp.text().await.map_err(|e| self.transport_error(e))
    }

    /// POST a JSON object body.
    pub(crate) async fn post_json(&self, path: &str, body: &Payload) -> Result<Value, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.send(self.http.post(url).json(body)).await?;
        self.handle_json(resp).await
    }

    /// POST without a body, for parameterless actions (delete, reconfigure, ...).
    pub(crate) async fn post_empty(&self, path: &str) -> Result<Value, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (no body)");

        let resp = self.send(self.http.post(url)).await?;
        self.handle_json(resp).await
    }

    /// POST a local CSV file as a multipart upload (part name `file`).
    pub(crate) async fn post_file(&self, path: &str, file_path: &Path) -> Result<Value, Error> {
        let url = self.url(path)?;
        let bytes = tokio::fs::read(file_path).await.map_err(|source| Error::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.csv")
            .to_owned();
        debug!("POST {url} (multipart, {} bytes from {file_name})", bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/csv")
            .map_err(Error::Transport)?;
        let form = Form::new().part("file", part);

        let resp = self.send(self.http.post(url).multipart(form)).await?;
        self.handle_json(resp).await
    }

    /// POST raw CSV text as the request body.
    pub(crate) async fn post_csv(&self, path: &str, data: &str) -> Result<Value, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (csv, {} bytes)", data.len());

        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "text/csv")
            .body(data.to_owned());
        let resp = self.send(request).await?;
        self.handle_json(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Attach credentials, send, and turn non-2xx statuses into errors.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let resp = request
            .basic_auth(self.credentials.key(), Some(self.credentials.expose_secret()))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        trace!(status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Error::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            body,
        })
    }

    async fn handle_json(&self, resp: reqwest::Response) -> Result<Value, Error> {
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}
