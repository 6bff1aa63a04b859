// API key/secret pair and the credentials-file loader.
//
// OPNsense hands out API keys as a small text file of `key=...` and
// `secret=...` lines. Both the file loader and the plain-text parser
// live here so callers can feed either a path or a string.

use std::collections::HashMap;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info};

use crate::error::Error;

/// An OPNsense API key and its secret.
///
/// The secret is wrapped in [`SecretString`] so `Debug` output never
/// leaks it.
#[derive(Debug, Clone)]
pub struct Credentials {
    key: String,
    secret: SecretString,
}

impl Credentials {
    /// Build credentials from an explicit key/secret pair.
    ///
    /// Both values must be non-empty.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, Error> {
        let key = key.into();
        let secret = secret.into();
        if key.is_empty() || secret.is_empty() {
            return Err(Error::config("API key and API secret must both be non-empty"));
        }
        Ok(Self {
            key,
            secret: SecretString::from(secret),
        })
    }

    /// Load credentials from an OPNsense API key file.
    ///
    /// ```text
    /// key="w86XNZob/8Oq8aC5r0kbNarNtdpoQU781fyoeaOBQsBwkXUt"
    /// secret="XeD26XVrJ5ilAc/EmglCRC+0j2e57tRsjHwFepOseySWLM53pJASeTA3"
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            error!(path = %path.display(), "credentials file not found");
            return Err(Error::CredentialFileNotFound {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), "reading API credentials");
        let malformed = |reason: String| {
            error!(path = %path.display(), %reason, "invalid credentials file");
            Error::MalformedCredentials {
                path: path.to_path_buf(),
                reason,
            }
        };

        let text = std::fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
        let creds = Self::parse(&text).map_err(malformed)?;

        info!(path = %path.display(), "API credentials loaded");
        Ok(creds)
    }

    /// Parse the `key = "value"` line format.
    ///
    /// Lines without `=` are skipped. Values are trimmed and stripped of
    /// surrounding quotes; the last occurrence of a name wins. Returns the
    /// reason on failure so the file loader can attach the path.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut entries: HashMap<&str, &str> = HashMap::new();
        for line in text.lines() {
            let Some((name, value)) = line.trim().split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
            entries.insert(name.trim(), value);
        }

        let key = entries.get("key").copied().unwrap_or_default();
        let secret = entries.get("secret").copied().unwrap_or_default();
        if key.is_empty() || secret.is_empty() {
            return Err(
                "the file must contain both 'key' and 'secret' in the format key=\"value\"".into(),
            );
        }

        Ok(Self {
            key: key.to_owned(),
            secret: SecretString::from(secret.to_owned()),
        })
    }

    /// The API key (sent as the Basic auth user name).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The API secret (sent as the Basic auth password).
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    pub(crate) fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}
