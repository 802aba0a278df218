//! ComputerSystem (`/redfish/v1/Systems/{id}/`) decoding

use crate::decode::{null_as_default, parse_json, payload_text, Decode};
use crate::error::{RedfishError, Result};
use crate::numeric::{coerce_u64, UnsupportedJsonType};
use crate::odata::ODataAnnotation;
use crate::types::HealthStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ProcessorSummary {
    count: Option<u64>,
    logical_processor_count: Option<u64>,
    model: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    status: HealthStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct MemorySummary {
    memory_mirroring: Option<String>,
    /// Integer on some firmware, float on others.
    #[serde(rename = "TotalSystemMemoryGiB")]
    total_system_memory_gib: Value,
    #[serde(deserialize_with = "null_as_default")]
    status: HealthStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActionDescriptor {
    target: Option<String>,
    #[serde(rename = "ResetType@Redfish.AllowableValues")]
    #[serde(deserialize_with = "null_as_default")]
    allowed_values: Vec<String>,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Boot {
    #[serde(deserialize_with = "null_as_default")]
    boot_options: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    boot_order: Vec<String>,
    #[serde(rename = "BootOrder@odata.count")]
    boot_order_count: Option<u64>,
    boot_source_override_enabled: Option<String>,
    boot_source_override_mode: Option<String>,
    boot_source_override_target: Option<String>,
    #[serde(rename = "BootSourceOverrideTarget@Redfish.AllowableValues")]
    #[serde(deserialize_with = "null_as_default")]
    boot_source_override_target_allowable_values: Vec<String>,
    uefi_target_boot_source_override: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SystemLinks {
    #[serde(deserialize_with = "null_as_default")]
    chassis: Vec<ODataAnnotation>,
    #[serde(rename = "Chassis@odata.count")]
    chassis_count: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    cooled_by: Vec<ODataAnnotation>,
    #[serde(rename = "CooledBy@odata.count")]
    cooled_by_count: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    managed_by: Vec<ODataAnnotation>,
    #[serde(rename = "ManagedBy@odata.count")]
    managed_by_count: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    powered_by: Vec<ODataAnnotation>,
    #[serde(rename = "PoweredBy@odata.count")]
    powered_by_count: Option<u64>,
    oem: Value,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct TrustedModule {
    firmware_version: Option<String>,
    interface_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    status: HealthStatus,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct HostWatchdogTimer {
    function_enabled: Option<bool>,
    timeout_action: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    status: HealthStatus,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct DellSystem {
    #[serde(flatten)]
    odata: ODataAnnotation,
    #[serde(rename = "BIOSReleaseDate")]
    bios_release_date: Option<String>,
    chassis_model: Option<String>,
    chassis_name: Option<String>,
    chassis_service_tag: Option<String>,
    express_service_code: Option<String>,
    last_system_inventory_time: Option<String>,
    last_update_time: Option<String>,
    #[serde(rename = "MaxCPUSockets")]
    max_cpu_sockets: Option<u64>,
    #[serde(rename = "MaxDIMMSlots")]
    max_dimm_slots: Option<u64>,
    #[serde(rename = "MaxPCIeSlots")]
    max_pcie_slots: Option<u64>,
    #[serde(rename = "PopulatedDIMMSlots")]
    populated_dimm_slots: Option<u64>,
    #[serde(rename = "PopulatedPCIeSlots")]
    populated_pcie_slots: Option<u64>,
    memory_operation_mode: Option<String>,
    #[serde(rename = "NodeID")]
    node_id: Option<String>,
    system_generation: Option<String>,
    #[serde(rename = "SystemID")]
    system_id: Option<u64>,
    system_revision: Option<String>,
    #[serde(rename = "UUID")]
    uuid: Option<String>,
    #[serde(rename = "smbiosGUID")]
    smbios_guid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct DellSystemOem {
    #[serde(deserialize_with = "null_as_default")]
    dell_system: DellSystem,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SystemOem {
    #[serde(deserialize_with = "null_as_default")]
    dell: DellSystemOem,
}

/// ComputerSystem as iDRAC sends it.
#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ComputerSystemResponse {
    #[serde(flatten)]
    odata: ODataAnnotation,
    id: Option<String>,
    #[serde(rename = "UUID")]
    uuid: Option<String>,
    name: Option<String>,
    asset_tag: Option<String>,
    bios_version: Option<String>,
    manufacturer: Option<String>,
    model: Option<String>,
    part_number: Option<String>,
    #[serde(rename = "SKU")]
    sku: Option<String>,
    serial_number: Option<String>,
    system_type: Option<String>,
    description: Option<String>,
    #[serde(rename = "PCIeDevices@odata.count")]
    pcie_devices_count: Option<u64>,
    #[serde(rename = "PCIeFunctions@odata.count")]
    pcie_functions_count: Option<u64>,
    #[serde(rename = "HostingRoles@odata.count")]
    hosting_roles_count: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    status: HealthStatus,
    host_name: Option<String>,
    #[serde(rename = "IndicatorLED")]
    indicator_led: Option<String>,
    power_state: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    processor_summary: ProcessorSummary,
    #[serde(deserialize_with = "null_as_default")]
    memory_summary: MemorySummary,
    #[serde(deserialize_with = "null_as_default")]
    actions: BTreeMap<String, Option<ActionDescriptor>>,

    #[serde(deserialize_with = "null_as_default")]
    secure_boot: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    network_interfaces: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    storage: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    simple_storage: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    ethernet_interfaces: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    bios: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    memory: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    processors: ODataAnnotation,
    #[serde(rename = "PCIeDevices")]
    #[serde(deserialize_with = "null_as_default")]
    pcie_devices: Vec<ODataAnnotation>,
    #[serde(rename = "PCIeFunctions")]
    #[serde(deserialize_with = "null_as_default")]
    pcie_functions: Vec<ODataAnnotation>,
    #[serde(deserialize_with = "null_as_default")]
    trusted_modules: Vec<TrustedModule>,
    #[serde(deserialize_with = "null_as_default")]
    host_watchdog_timer: HostWatchdogTimer,
    hosting_roles: Value,
    #[serde(deserialize_with = "null_as_default")]
    boot: Boot,
    #[serde(deserialize_with = "null_as_default")]
    links: SystemLinks,
    #[serde(deserialize_with = "null_as_default")]
    oem: SystemOem,
}

/// Counts derived from `*@odata.count` members and the processor and
/// memory summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComputerSystemCounters {
    pub boot_order: u64,
    pub hosting_roles: u64,
    pub chassis: u64,
    pub cooled_by: u64,
    pub managed_by: u64,
    pub powered_by: u64,
    pub pcie_devices: u64,
    pub pcie_functions: u64,
    pub total_processors: u64,
    pub logical_processors: u64,
    /// GiB
    pub total_system_memory: u64,
}

/// A write-capable endpoint advertised under `Actions`.
///
/// Only listed for discovery; this crate never posts to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionEndpoint {
    pub action: String,
    pub target: String,
    pub allowed_values: Vec<String>,
}

/// One physical or virtual machine as described by Redfish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComputerSystem {
    pub id: String,
    pub odata: ODataAnnotation,
    pub uuid: String,
    pub name: String,
    pub serial_number: String,
    pub asset_tag: String,
    pub bios_version: String,
    pub manufacturer: String,
    pub model: String,
    pub part_number: String,
    pub sku: String,
    pub system_type: String,
    pub description: String,
    pub status: HealthStatus,
    pub counters: ComputerSystemCounters,
    pub hostname: String,
    pub indicator_led: String,
    pub power_state: String,
    pub processor_model: String,
    pub processor_status: HealthStatus,
    pub memory_mirroring: String,
    pub memory_status: HealthStatus,
    /// `Oem.Dell.DellSystem.ExpressServiceCode`
    pub express_service_code: String,
    /// `Oem.Dell.DellSystem.SystemGeneration`
    pub system_generation: String,
    /// `Oem.Dell.DellSystem.BIOSReleaseDate`
    pub bios_release_date: String,
    /// Sorted by action name.
    pub action_endpoints: Vec<ActionEndpoint>,
}

impl Decode for ComputerSystem {
    fn decode(bytes: &[u8]) -> Result<Self> {
        let response: ComputerSystemResponse = parse_json(bytes)?;

        let total_system_memory = coerce_u64(&response.memory_summary.total_system_memory_gib)
            .map_err(|UnsupportedJsonType(found)| RedfishError::UnsupportedType {
                field: "MemorySummary.TotalSystemMemoryGiB",
                found,
                payload: payload_text(bytes),
            })?;

        let counters = ComputerSystemCounters {
            boot_order: response.boot.boot_order_count.unwrap_or_default(),
            hosting_roles: response.hosting_roles_count.unwrap_or_default(),
            chassis: response.links.chassis_count.unwrap_or_default(),
            cooled_by: response.links.cooled_by_count.unwrap_or_default(),
            managed_by: response.links.managed_by_count.unwrap_or_default(),
            powered_by: response.links.powered_by_count.unwrap_or_default(),
            pcie_devices: response.pcie_devices_count.unwrap_or_default(),
            pcie_functions: response.pcie_functions_count.unwrap_or_default(),
            total_processors: response.processor_summary.count.unwrap_or_default(),
            logical_processors: response
                .processor_summary
                .logical_processor_count
                .unwrap_or_default(),
            total_system_memory,
        };

        // BTreeMap iteration keeps the endpoints ordered by action name.
        // Entries without a target (the nested "Oem" block) are not actions.
        let action_endpoints = response
            .actions
            .into_iter()
            .filter_map(|(action, descriptor)| {
                let descriptor = descriptor?;
                descriptor.target.map(|target| ActionEndpoint {
                    action,
                    target,
                    allowed_values: descriptor.allowed_values,
                })
            })
            .collect();

        let dell = response.oem.dell.dell_system;

        Ok(ComputerSystem {
            id: response.id.unwrap_or_default(),
            odata: response.odata,
            uuid: response.uuid.unwrap_or_default(),
            name: response.name.unwrap_or_default(),
            serial_number: response.serial_number.unwrap_or_default(),
            asset_tag: response.asset_tag.unwrap_or_default(),
            bios_version: response.bios_version.unwrap_or_default(),
            manufacturer: response.manufacturer.unwrap_or_default(),
            model: response.model.unwrap_or_default(),
            part_number: response.part_number.unwrap_or_default(),
            sku: response.sku.unwrap_or_default(),
            system_type: response.system_type.unwrap_or_default(),
            description: response.description.unwrap_or_default(),
            status: response.status,
            counters,
            hostname: response.host_name.unwrap_or_default(),
            indicator_led: response.indicator_led.unwrap_or_default(),
            power_state: response.power_state.unwrap_or_default(),
            processor_model: response.processor_summary.model.unwrap_or_default(),
            processor_status: response.processor_summary.status,
            memory_mirroring: response.memory_summary.memory_mirroring.unwrap_or_default(),
            memory_status: response.memory_summary.status,
            express_service_code: dell.express_service_code.unwrap_or_default(),
            system_generation: dell.system_generation.unwrap_or_default(),
            bios_release_date: dell.bios_release_date.unwrap_or_default(),
            action_endpoints,
        })
    }
}
