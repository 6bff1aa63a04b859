//! Clap derive structures for the `opnsense` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// opnsense -- manage Kea and ISC DHCP on an OPNsense firewall
#[derive(Debug, Parser)]
#[command(
    name = "opnsense",
    version,
    about = "Manage OPNsense DHCP services from the command line",
    long_about = "Drive the OPNsense Kea DHCP and DHCPv4 REST API.\n\n\
        Connection settings come from the config file, OPNSENSE_* environment\n\
        variables, and the flags below, in increasing order of precedence.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (default: <config dir>/opnsense/config.toml)
    #[arg(long, env = "OPNSENSE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Firewall URL, e.g. https://192.168.1.1
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key file with `key=` and `secret=` lines
    #[arg(long, global = true)]
    pub api_key_file: Option<PathBuf>,

    /// API key (ignored when an API key file is configured)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API secret
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Verify the firewall's TLS certificate
    #[arg(long, global = true, overrides_with = "no_verify_cert")]
    pub verify_cert: bool,

    /// Skip certificate verification even if the config enables it
    #[arg(long, global = true, overrides_with = "verify_cert")]
    pub no_verify_cert: bool,

    /// PEM CA certificate to trust when verifying
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Kea DHCP server configuration and control
    Kea(KeaArgs),

    /// ISC DHCPv4 leases and service control
    Dhcpv4(Dhcpv4Args),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Kea ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct KeaArgs {
    #[command(subcommand)]
    pub command: KeaCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeaCommand {
    /// Kea control agent settings
    CtrlAgent(SettingsArgs),

    /// Kea DHCPv4 general settings
    Dhcpv4(SettingsArgs),

    /// Kea DHCPv4 subnets
    #[command(alias = "subnet")]
    Subnets(CrudArgs),

    /// Kea DHCPv4 static reservations
    #[command(alias = "res")]
    Reservations(ReservationsArgs),

    /// Kea high-availability peers
    #[command(alias = "peer")]
    Peers(CrudArgs),

    /// Kea service control
    Service(KeaServiceArgs),
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the current settings
    Get,

    /// Replace settings from a JSON object
    Set {
        /// JSON file, or `-` for stdin
        payload: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct CrudArgs {
    #[command(subcommand)]
    pub command: CrudCommand,
}

#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    /// List all entries
    #[command(alias = "ls")]
    List,

    /// Show one entry
    Get { uuid: String },

    /// Create an entry from a JSON object
    Add {
        /// JSON file, or `-` for stdin
        payload: PathBuf,
    },

    /// Update an entry from a JSON object
    Set {
        uuid: String,
        /// JSON file, or `-` for stdin
        payload: PathBuf,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete { uuid: String },
}

#[derive(Debug, Args)]
pub struct ReservationsArgs {
    #[command(subcommand)]
    pub command: ReservationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Export all reservations as CSV
    Download {
        /// Write the CSV here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import reservations from CSV
    Upload {
        /// Local CSV file, sent as a multipart upload
        #[arg(long, conflicts_with = "data", required_unless_present = "data")]
        file: Option<PathBuf>,

        /// Inline CSV text
        #[arg(long)]
        data: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct KeaServiceArgs {
    #[command(subcommand)]
    pub command: KeaServiceCommand,
}

#[derive(Debug, Subcommand)]
pub enum KeaServiceCommand {
    /// Show service status
    Status,

    /// Apply staged configuration
    Reconfigure,
}

// ── ISC DHCPv4 ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct Dhcpv4Args {
    #[command(subcommand)]
    pub command: Dhcpv4Command,
}

#[derive(Debug, Subcommand)]
pub enum Dhcpv4Command {
    /// DHCPv4 leases
    #[command(alias = "lease")]
    Leases(LeasesArgs),

    /// DHCPv4 service control
    Service(Dhcpv4ServiceArgs),
}

#[derive(Debug, Args)]
pub struct LeasesArgs {
    #[command(subcommand)]
    pub command: LeasesCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeasesCommand {
    /// List leases
    #[command(alias = "ls")]
    List,

    /// Remove the lease for an IP address
    #[command(alias = "rm")]
    Delete { ip: String },
}

#[derive(Debug, Args)]
pub struct Dhcpv4ServiceArgs {
    #[command(subcommand)]
    pub command: Dhcpv4ServiceCommand,
}

#[derive(Debug, Subcommand)]
pub enum Dhcpv4ServiceCommand {
    /// Show service status
    Status,
    Start,
    Stop,
    Restart,
    /// Regenerate the daemon configuration
    Reconfigure,
}
