//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dell iDRAC Redfish API client
#[derive(Parser, Debug)]
#[command(name = "idracctl")]
#[command(version, about = "Dell iDRAC Redfish API client", long_about = None)]
pub struct Cli {
    /// iDRAC hostname or IP address
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// iDRAC port (default: 443)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Protocol, http or https (default: https)
    #[arg(long, global = true)]
    pub proto: Option<String>,

    /// Username for HTTP Basic authentication
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Verify the server's TLS certificate (`--validate-server-cert=false` to
    /// turn off a setting from the environment or config file)
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub validate_server_cert: Option<bool>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file path (default: <config dir>/idrac-redfish/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Log level; RUST_LOG takes precedence when set
    #[arg(
        long,
        global = true,
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get basic information about a remote Redfish API endpoint
    GetInfo,

    /// Get information about computer systems exposed via Redfish API
    GetSystems,

    /// List the members of the computer system collection
    GetSystemCollection,

    /// Get a single computer system by its resource path
    GetSystem {
        /// Resource path, e.g. /redfish/v1/Systems/System.Embedded.1/
        path: String,
    },

    /// Fetch an arbitrary Redfish resource and print it verbatim
    GetResource {
        /// Resource path, e.g. /redfish/v1/Managers/iDRAC.Embedded.1/
        path: String,
    },

    /// List the supported operations
    Operations,

    /// Show CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration (password masked)
    Show,
}
