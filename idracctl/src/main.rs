//! iDRAC Redfish CLI
//!
//! Command-line interface for querying Dell iDRAC Redfish endpoints.

use anyhow::Result;
use clap::Parser;
use idracctl::cli::{
    generate_completion, handle_config, handle_get_info, handle_get_resource, handle_get_system,
    handle_get_system_collection, handle_get_systems, handle_operations, resolve_config, Cli,
    Commands, OutputFormat,
};
use idracctl::format::format_error;
use std::time::Instant;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level);

    // Commands that never talk to an endpoint
    match cli.command {
        Commands::Completion { shell } => {
            generate_completion(shell);
            return Ok(());
        }
        Commands::Operations => {
            let format = cli.format.clone().unwrap_or(OutputFormat::Table);
            return handle_operations(&format);
        }
        _ => {}
    }

    // Build configuration using priority chain: CLI args → env → file → defaults
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&format!("Configuration error: {:#}", e)));
            std::process::exit(1);
        }
    };

    let output_format = match config.output_format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let client = match config.to_client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", format_error(&format!("Configuration error: {:#}", e)));
            std::process::exit(1);
        }
    };
    debug!("Using Redfish endpoint {}", client.base_url());

    let started = Instant::now();

    let result = match cli.command {
        Commands::GetInfo => handle_get_info(&client, &output_format).await,
        Commands::GetSystems => handle_get_systems(&client, &output_format).await,
        Commands::GetSystemCollection => {
            handle_get_system_collection(&client, &output_format).await
        }
        Commands::GetSystem { ref path } => handle_get_system(&client, path, &output_format).await,
        Commands::GetResource { ref path } => handle_get_resource(&client, path).await,
        Commands::Config { command } => handle_config(command, &config, &output_format),
        Commands::Operations | Commands::Completion { .. } => Ok(()),
    };

    debug!("took {:?}", started.elapsed());

    if let Err(e) = result {
        eprintln!("{}", format_error(&format!("{:#}", e)));
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber for logging
///
/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
