//! Resolve the effective `ApiConfig` for a CLI invocation.
//!
//! Layering, lowest to highest: built-in defaults, the TOML config file,
//! `OPNSENSE_*` environment variables, then command-line flags.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::providers::Serialized;
use serde::Serialize;

use opnsense_api::ApiConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Default config file location (`<config dir>/opnsense/config.toml`).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "opnsense").map_or_else(
        || PathBuf::from("opnsense.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Flags that were actually given on the command line.
///
/// Unset fields are skipped so they don't mask file or env values.
#[derive(Debug, Default, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verify_cert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ca_cert: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
}

impl From<&GlobalOpts> for Overrides {
    fn from(global: &GlobalOpts) -> Self {
        Self {
            base_url: global.base_url.clone(),
            api_key_file: global.api_key_file.clone(),
            api_key: global.api_key.clone(),
            api_secret: global.api_secret.clone(),
            verify_cert: match (global.verify_cert, global.no_verify_cert) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            },
            ca_cert: global.ca_cert.clone(),
            timeout: global.timeout,
        }
    }
}

/// Build the `ApiConfig` for this run and check it names a firewall and
/// a credential source.
pub fn resolve(global: &GlobalOpts) -> Result<ApiConfig, CliError> {
    let path = global.config.clone().unwrap_or_else(config_path);
    tracing::debug!(path = %path.display(), "loading config");

    let config: ApiConfig = ApiConfig::figment(&path)
        .merge(Serialized::defaults(Overrides::from(global)))
        .extract()?;

    let display_path = path.display().to_string();
    if config.base_url.trim().is_empty() {
        return Err(CliError::NoBaseUrl { path: display_path });
    }
    let has_pair = config.api_key.as_deref().is_some_and(|k| !k.is_empty())
        && config.api_secret.is_some();
    let has_file = config
        .api_key_file
        .as_deref()
        .is_some_and(|p| !p.as_os_str().is_empty());
    if !has_file && !has_pair {
        return Err(CliError::NoCredentials { path: display_path });
    }

    Ok(config)
}
