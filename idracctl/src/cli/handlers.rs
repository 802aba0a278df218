//! Command execution handlers

use anyhow::Result;

use crate::client::RedfishClient;
use crate::config::{CliConfig, ConfigBuilder};
use crate::format::{
    format_collection, format_computer_system, format_computer_systems, format_config,
    format_info, format_operations,
};

use super::commands::*;

/// Resolve configuration: flags, then `IDRAC_API_*`, then the config file.
pub fn resolve_config(cli: &Cli) -> Result<CliConfig> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref host) = cli.host {
        builder = builder.with_host(host)?;
    }
    if let Some(port) = cli.port {
        builder = builder.with_port(port)?;
    }
    if let Some(ref proto) = cli.proto {
        builder = builder.with_protocol(proto)?;
    }
    if let Some(ref username) = cli.username {
        builder = builder.with_username(username)?;
    }
    if let Some(ref password) = cli.password {
        builder = builder.with_password(password)?;
    }
    if let Some(validate) = cli.validate_server_cert {
        builder = builder.with_validate_server_cert(validate);
    }
    if let Some(ref format) = cli.format {
        let format_str = match format {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        };
        builder = builder.with_output_format(format_str)?;
    }

    builder = builder.with_env_overrides();

    if !cli.no_config {
        builder = builder.with_config_file(cli.config.as_deref())?;
    }

    builder.build()
}

/// Handle get-info command
pub async fn handle_get_info(client: &RedfishClient, format: &OutputFormat) -> Result<()> {
    let info = client.get_info().await?;
    println!("{}", format_info(&info, &format.into())?);
    Ok(())
}

/// Handle get-systems command
pub async fn handle_get_systems(client: &RedfishClient, format: &OutputFormat) -> Result<()> {
    let systems = client.get_computer_systems().await?;
    println!("{}", format_computer_systems(&systems, &format.into())?);
    Ok(())
}

/// Handle get-system-collection command
pub async fn handle_get_system_collection(
    client: &RedfishClient,
    format: &OutputFormat,
) -> Result<()> {
    let collection = client.get_computer_system_collection().await?;
    println!("{}", format_collection(&collection, &format.into())?);
    Ok(())
}

/// Handle get-system command
pub async fn handle_get_system(
    client: &RedfishClient,
    path: &str,
    format: &OutputFormat,
) -> Result<()> {
    let system = client.get_computer_system_by_resource_id(path).await?;
    println!("{}", format_computer_system(&system, &format.into())?);
    Ok(())
}

/// Handle get-resource command; the document is printed as received
pub async fn handle_get_resource(client: &RedfishClient, path: &str) -> Result<()> {
    let resource = client.get_resource(path).await?;
    println!("{}", resource);
    Ok(())
}

/// Handle operations command
pub fn handle_operations(format: &OutputFormat) -> Result<()> {
    println!(
        "{}",
        format_operations(RedfishClient::get_operations(), &format.into())?
    );
    Ok(())
}

/// Handle config commands
pub fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            println!("{}", format_config(current_config, &format.into())?);
        }
    }

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
