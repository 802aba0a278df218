//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use idrac_core::{ComputerSystem, ComputerSystemCollection, HealthStatus, Info};

use crate::client::Operation;
use crate::config::CliConfig;
use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
}

fn colored_health(status: &HealthStatus) -> String {
    match status.summary() {
        Some("OK") => "OK".green().to_string(),
        Some("Warning") => "Warning".yellow().to_string(),
        Some(other) => other.red().to_string(),
        None => "-".dimmed().to_string(),
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Format service root information
pub fn format_info(info: &Info, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&"Redfish Endpoint Information".bold().to_string());
            output.push('\n');
            output.push_str(&format!("Product: {}", or_dash(&info.product).cyan()));
            output.push('\n');
            output.push_str(&format!(
                "Redfish Version: {}",
                info.redfish_version.cyan()
            ));
            output.push('\n');
            output.push_str(&format!(
                "Service Tag: {}",
                or_dash(&info.service_tag).yellow()
            ));
            output.push('\n');
            output.push_str(&format!(
                "Manager MAC Address: {}",
                or_dash(&info.manager_mac_address)
            ));
            Ok(output)
        }
    }
}

/// Format a list of computer systems, one row per system
pub fn format_computer_systems(systems: &[ComputerSystem], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(systems)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct SystemRow {
                #[tabled(rename = "ID")]
                id: String,
                #[tabled(rename = "Model")]
                model: String,
                #[tabled(rename = "Service Tag")]
                sku: String,
                #[tabled(rename = "Power")]
                power_state: String,
                #[tabled(rename = "Health")]
                health: String,
                #[tabled(rename = "CPUs")]
                processors: String,
                #[tabled(rename = "Memory GiB")]
                memory: String,
                #[tabled(rename = "BIOS")]
                bios_version: String,
            }

            let rows: Vec<SystemRow> = systems
                .iter()
                .map(|cs| SystemRow {
                    id: cs.id.cyan().to_string(),
                    model: or_dash(&cs.model).to_string(),
                    sku: or_dash(&cs.sku).to_string(),
                    power_state: match cs.power_state.as_str() {
                        "On" => "On".green().to_string(),
                        "" => "-".dimmed().to_string(),
                        other => other.red().to_string(),
                    },
                    health: colored_health(&cs.status),
                    processors: format!(
                        "{} ({} threads)",
                        cs.counters.total_processors, cs.counters.logical_processors
                    ),
                    memory: cs.counters.total_system_memory.to_string(),
                    bios_version: or_dash(&cs.bios_version).to_string(),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Computer Systems:".bold(), table))
        }
    }
}

/// Format every detail of a single computer system
pub fn format_computer_system(cs: &ComputerSystem, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(cs)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct FieldRow {
                #[tabled(rename = "Field")]
                field: String,
                #[tabled(rename = "Value")]
                value: String,
            }

            let row = |field: &str, value: String| FieldRow {
                field: field.to_string(),
                value,
            };
            let text = |value: &str| or_dash(value).to_string();
            let counters = &cs.counters;

            let rows = vec![
                row("Resource", text(&cs.odata.id)),
                row("UUID", text(&cs.uuid)),
                row("Name", text(&cs.name)),
                row("Manufacturer", text(&cs.manufacturer)),
                row("Model", text(&cs.model)),
                row("SKU", text(&cs.sku)),
                row("Serial Number", text(&cs.serial_number)),
                row("Part Number", text(&cs.part_number)),
                row("Asset Tag", text(&cs.asset_tag)),
                row("System Type", text(&cs.system_type)),
                row("Hostname", text(&cs.hostname)),
                row("Power State", text(&cs.power_state)),
                row("Indicator LED", text(&cs.indicator_led)),
                row("Health", colored_health(&cs.status)),
                row("BIOS Version", text(&cs.bios_version)),
                row("BIOS Release Date", text(&cs.bios_release_date)),
                row("Express Service Code", text(&cs.express_service_code)),
                row("System Generation", text(&cs.system_generation)),
                row("Processor Model", text(&cs.processor_model)),
                row(
                    "Processors",
                    format!(
                        "{} ({} logical)",
                        counters.total_processors, counters.logical_processors
                    ),
                ),
                row("Processor Health", colored_health(&cs.processor_status)),
                row(
                    "Memory",
                    format!("{} GiB", counters.total_system_memory),
                ),
                row("Memory Mirroring", text(&cs.memory_mirroring)),
                row("Memory Health", colored_health(&cs.memory_status)),
                row("PCIe Devices", counters.pcie_devices.to_string()),
                row("PCIe Functions", counters.pcie_functions.to_string()),
                row("Boot Order Entries", counters.boot_order.to_string()),
                row("Chassis", counters.chassis.to_string()),
                row("Cooled By", counters.cooled_by.to_string()),
                row("Managed By", counters.managed_by.to_string()),
                row("Powered By", counters.powered_by.to_string()),
                row("Hosting Roles", counters.hosting_roles.to_string()),
            ];

            let mut output = format!(
                "{}\n{}",
                format!("Computer System {}:", cs.id).bold(),
                Table::new(rows).with(Style::rounded())
            );

            if !cs.action_endpoints.is_empty() {
                #[derive(Tabled)]
                struct ActionRow {
                    #[tabled(rename = "Action")]
                    action: String,
                    #[tabled(rename = "Target")]
                    target: String,
                    #[tabled(rename = "Allowed Values")]
                    allowed_values: String,
                }

                let actions: Vec<ActionRow> = cs
                    .action_endpoints
                    .iter()
                    .map(|endpoint| ActionRow {
                        action: endpoint.action.yellow().to_string(),
                        target: endpoint.target.clone(),
                        allowed_values: endpoint.allowed_values.join(", "),
                    })
                    .collect();

                output.push_str(&format!(
                    "\n{}\n{}",
                    "Actions:".bold(),
                    Table::new(actions).with(Style::rounded())
                ));
            }

            Ok(output)
        }
    }
}

/// Format the systems collection without its expanded members
pub fn format_collection(
    collection: &ComputerSystemCollection,
    format: &OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(collection)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct MemberRow {
                #[tabled(rename = "#")]
                index: usize,
                #[tabled(rename = "Resource")]
                resource: String,
            }

            let rows: Vec<MemberRow> = collection
                .members
                .iter()
                .enumerate()
                .map(|(index, member)| MemberRow {
                    index: index + 1,
                    resource: member.id.cyan().to_string(),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!(
                "{} ({} members)\n{}",
                or_dash(&collection.name).bold(),
                collection.counters.computer_systems,
                table
            ))
        }
    }
}

/// Format the list of supported operations
pub fn format_operations(operations: &[Operation], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(operations)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct OperationRow {
                #[tabled(rename = "Operation")]
                name: String,
                #[tabled(rename = "Description")]
                description: String,
            }

            let rows: Vec<OperationRow> = operations
                .iter()
                .map(|op| OperationRow {
                    name: op.name.green().to_string(),
                    description: op.description.to_string(),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Available Operations:".bold(), table))
        }
    }
}

/// Format the resolved configuration; the password is always masked
pub fn format_config(config: &CliConfig, format: &OutputFormat) -> Result<String> {
    let config = config.masked();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&config)?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&"CLI Configuration:".bold().to_string());
            output.push('\n');
            output.push_str(&format!("{:<22} Value\n", "Setting"));
            output.push_str(&"-".repeat(40));
            output.push('\n');
            output.push_str(&format!("{:<22} {}\n", "Host", config.host));
            output.push_str(&format!("{:<22} {}\n", "Port", config.port));
            output.push_str(&format!("{:<22} {}\n", "Protocol", config.protocol));
            output.push_str(&format!("{:<22} {}\n", "Username", config.username));
            output.push_str(&format!("{:<22} {}\n", "Password", config.password));
            output.push_str(&format!(
                "{:<22} {}\n",
                "Validate Server Cert", config.validate_server_cert
            ));
            output.push_str(&format!("{:<22} {}", "Output Format", config.output_format));
            Ok(output)
        }
    }
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

/// Format error message
pub fn format_error(message: &str) -> String {
    format!("{} {}", "✗".red(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RedfishClient;
    use idrac_core::{ComputerSystemCounters, Decode, ODataAnnotation};

    fn sample_system() -> ComputerSystem {
        ComputerSystem {
            id: "System.Embedded.1".to_string(),
            odata: ODataAnnotation::new(
                "/redfish/v1/Systems/System.Embedded.1",
                "#ComputerSystem.v1_5_1.ComputerSystem",
                "",
            ),
            model: "PowerEdge R640".to_string(),
            sku: "24A8VC9".to_string(),
            power_state: "On".to_string(),
            counters: ComputerSystemCounters {
                pcie_devices: 11,
                pcie_functions: 16,
                total_processors: 2,
                logical_processors: 48,
                total_system_memory: 383,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_format_info_json() {
        let info = Info::decode_str(
            r#"{"Product": "Integrated Dell Remote Access Controller", "RedfishVersion": "1.6.0"}"#,
        )
        .unwrap();

        let json = format_info(&info, &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["redfish_version"], "1.6.0");
        assert_eq!(value["odata"]["id"], "");
    }

    #[test]
    fn test_format_info_table() {
        colored::control::set_override(false);
        let info = Info {
            product: "Integrated Dell Remote Access Controller".to_string(),
            redfish_version: "1.6.0".to_string(),
            service_tag: "24A8VC9".to_string(),
            ..Default::default()
        };

        let table = format_info(&info, &OutputFormat::Table).unwrap();
        assert!(table.contains("Redfish Version: 1.6.0"));
        assert!(table.contains("Service Tag: 24A8VC9"));
        assert!(table.contains("Manager MAC Address: -"));
    }

    #[test]
    fn test_format_computer_systems_table() {
        let table =
            format_computer_systems(&[sample_system()], &OutputFormat::Table).unwrap();
        assert!(table.contains("System.Embedded.1"));
        assert!(table.contains("PowerEdge R640"));
        assert!(table.contains("2 (48 threads)"));
        assert!(table.contains("383"));
    }

    #[test]
    fn test_format_computer_system_json_uses_plain_odata_keys() {
        let json = format_computer_system(&sample_system(), &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["odata"]["id"], "/redfish/v1/Systems/System.Embedded.1");
        assert_eq!(value["counters"]["pcie_devices"], 11);
        assert!(value["odata"].get("@odata.id").is_none());
    }

    #[test]
    fn test_format_computer_system_table() {
        let table = format_computer_system(&sample_system(), &OutputFormat::Table).unwrap();
        assert!(table.contains("PCIe Devices"));
        assert!(table.contains("383 GiB"));
        assert!(!table.contains("Actions:"));
    }

    #[test]
    fn test_format_operations() {
        let table =
            format_operations(RedfishClient::get_operations(), &OutputFormat::Table).unwrap();
        assert!(table.contains("get-info"));
        assert!(table.contains("get-resource"));

        let json =
            format_operations(RedfishClient::get_operations(), &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_format_config_masks_password() {
        let config = CliConfig {
            host: "idrac.example.net".to_string(),
            port: 443,
            protocol: "https".to_string(),
            username: "root".to_string(),
            password: "calvin".to_string(),
            validate_server_cert: false,
            output_format: "table".to_string(),
        };

        for format in [OutputFormat::Table, OutputFormat::Json] {
            let output = format_config(&config, &format).unwrap();
            assert!(!output.contains("calvin"));
            assert!(output.contains("idrac.example.net"));
        }
    }
}
