//! Service root (`/redfish/v1/`) decoding

use crate::decode::{null_as_default, parse_json, payload_text, Decode};
use crate::error::{RedfishError, Result};
use crate::odata::ODataAnnotation;
use serde::{Deserialize, Serialize};

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ExpandQuery {
    #[serde(deserialize_with = "null_as_default")]
    expand_all: bool,
    #[serde(deserialize_with = "null_as_default")]
    levels: bool,
    #[serde(deserialize_with = "null_as_default")]
    links: bool,
    #[serde(deserialize_with = "null_as_default")]
    max_levels: u64,
    #[serde(deserialize_with = "null_as_default")]
    no_links: bool,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ProtocolFeatures {
    #[serde(deserialize_with = "null_as_default")]
    excerpt_query: bool,
    #[serde(deserialize_with = "null_as_default")]
    filter_query: bool,
    #[serde(deserialize_with = "null_as_default")]
    only_member_query: bool,
    #[serde(deserialize_with = "null_as_default")]
    select_query: bool,
    #[serde(deserialize_with = "null_as_default")]
    expand_query: ExpandQuery,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct RootLinks {
    #[serde(deserialize_with = "null_as_default")]
    sessions: ODataAnnotation,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct DellRoot {
    is_branded: Option<u64>,
    #[serde(rename = "ManagerMACAddress")]
    manager_mac_address: Option<String>,
    service_tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct RootOem {
    #[serde(deserialize_with = "null_as_default")]
    dell: DellRoot,
}

/// The service root as iDRAC sends it. Only a handful of members are
/// projected into [`Info`]; the links are kept to document the shape.
#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct InfoResponse {
    #[serde(flatten)]
    odata: ODataAnnotation,
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    product: Option<String>,
    redfish_version: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    protocol_features_supported: ProtocolFeatures,
    #[serde(deserialize_with = "null_as_default")]
    account_service: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    certificate_service: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    chassis: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    event_service: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    fabrics: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    job_service: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    json_schemas: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    managers: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    registries: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    session_service: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    systems: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    tasks: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    telemetry_service: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    update_service: ODataAnnotation,
    #[serde(deserialize_with = "null_as_default")]
    links: RootLinks,
    #[serde(deserialize_with = "null_as_default")]
    oem: RootOem,
}

/// Basic facts about a Redfish endpoint, taken from the service root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Info {
    pub odata: ODataAnnotation,
    pub product: String,
    pub service_tag: String,
    pub manager_mac_address: String,
    pub redfish_version: String,
}

impl Decode for Info {
    fn decode(bytes: &[u8]) -> Result<Self> {
        let response: InfoResponse = parse_json(bytes)?;

        let redfish_version = response.redfish_version.unwrap_or_default();
        // An all-empty document is what a non-Redfish endpoint looks like.
        if redfish_version.is_empty() {
            return Err(RedfishError::MissingField {
                field: "RedfishVersion",
                payload: payload_text(bytes),
            });
        }

        Ok(Info {
            odata: response.odata,
            product: response.product.unwrap_or_default(),
            service_tag: response.oem.dell.service_tag.unwrap_or_default(),
            manager_mac_address: response.oem.dell.manager_mac_address.unwrap_or_default(),
            redfish_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = r##"{
        "@odata.context": "/redfish/v1/$metadata#ServiceRoot.ServiceRoot",
        "@odata.id": "/redfish/v1",
        "@odata.type": "#ServiceRoot.v1_3_0.ServiceRoot",
        "Id": "RootService",
        "Name": "Root Service",
        "Product": "Integrated Dell Remote Access Controller",
        "RedfishVersion": "1.6.0",
        "Systems": {"@odata.id": "/redfish/v1/Systems"},
        "Oem": {
            "Dell": {
                "@odata.type": "#DellServiceRoot.v1_0_0.ServiceRootSummary",
                "IsBranded": 0,
                "ManagerMACAddress": "eb:f2:49:84:66:d4",
                "ServiceTag": "24A8VC9"
            }
        }
    }"##;

    #[test]
    fn test_decode_root() {
        let info = Info::decode_str(ROOT).unwrap();
        assert_eq!(info.product, "Integrated Dell Remote Access Controller");
        assert_eq!(info.service_tag, "24A8VC9");
        assert_eq!(info.manager_mac_address, "eb:f2:49:84:66:d4");
        assert_eq!(info.redfish_version, "1.6.0");
        assert_eq!(
            info.odata,
            ODataAnnotation::new(
                "/redfish/v1",
                "#ServiceRoot.v1_3_0.ServiceRoot",
                "/redfish/v1/$metadata#ServiceRoot.ServiceRoot",
            )
        );
    }

    #[test]
    fn test_bytes_and_str_agree() {
        let from_bytes = Info::decode(ROOT.as_bytes()).unwrap();
        let from_str = Info::decode_str(ROOT).unwrap();
        assert_eq!(from_bytes, from_str);
    }

    #[test]
    fn test_empty_version_is_error() {
        let doc = ROOT.replace("\"1.6.0\"", "\"\"");
        match Info::decode_str(&doc) {
            Err(RedfishError::MissingField { field, .. }) => assert_eq!(field, "RedfishVersion"),
            other => panic!("Expected MissingField error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_version_is_error() {
        let doc = r#"{"@odata.id": "/redfish/v1", "Product": "Something Else"}"#;
        assert!(matches!(
            Info::decode_str(doc),
            Err(RedfishError::MissingField { .. })
        ));
    }

    #[test]
    fn test_empty_object_is_error() {
        assert!(Info::decode_str("{}").is_err());
    }

    #[test]
    fn test_malformed_json_keeps_payload() {
        match Info::decode_str("{\"RedfishVersion\": ") {
            Err(RedfishError::Parse { payload, .. }) => {
                assert_eq!(payload, "{\"RedfishVersion\": ");
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_oem_leaves_fields_empty() {
        let doc = r#"{"RedfishVersion": "1.0.2", "Product": "Generic BMC"}"#;
        let info = Info::decode_str(doc).unwrap();
        assert_eq!(info.product, "Generic BMC");
        assert!(info.service_tag.is_empty());
        assert!(info.manager_mac_address.is_empty());
    }

    #[test]
    fn test_null_objects_read_as_empty() {
        let doc = r#"{
            "RedfishVersion": "1.6.0",
            "Oem": null,
            "Links": null,
            "Systems": null,
            "ProtocolFeaturesSupported": {"ExpandQuery": null, "SelectQuery": null}
        }"#;
        let info = Info::decode_str(doc).unwrap();
        assert_eq!(info.redfish_version, "1.6.0");
        assert!(info.service_tag.is_empty());

        let doc = r#"{"RedfishVersion": "1.6.0", "Oem": {"Dell": null}}"#;
        assert!(Info::decode_str(doc).unwrap().manager_mac_address.is_empty());
    }
}
