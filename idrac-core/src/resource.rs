//! Untyped Redfish resources

use crate::decode::{parse_json, Decode};
use crate::error::{RedfishError, Result};
use crate::odata::ODataAnnotation;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Any Redfish document without a dedicated decoder.
///
/// Keeps the body verbatim next to whatever OData envelope it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub odata: ODataAnnotation,
    pub raw: Vec<u8>,
}

impl Resource {
    /// Wrap a body without requiring it to be JSON.
    ///
    /// The envelope is filled in when the body is a JSON object and left
    /// empty otherwise.
    pub fn from_raw(raw: Vec<u8>) -> Self {
        let odata = serde_json::from_slice::<Value>(&raw)
            .ok()
            .and_then(|value| envelope(&value).ok())
            .unwrap_or_default();
        Self { odata, raw }
    }
}

/// OData envelope of a parsed document. Only objects carry one; arrays and
/// scalars yield an empty envelope.
fn envelope(value: &Value) -> serde_json::Result<ODataAnnotation> {
    match value {
        Value::Object(_) => ODataAnnotation::deserialize(value),
        _ => Ok(ODataAnnotation::default()),
    }
}

impl Decode for Resource {
    fn decode(bytes: &[u8]) -> Result<Self> {
        let value: Value = parse_json(bytes)?;
        let odata = envelope(&value).map_err(|e| RedfishError::parse(e, bytes))?;
        Ok(Self {
            odata,
            raw: bytes.to_vec(),
        })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANAGER: &str = r##"{
        "@odata.id": "/redfish/v1/Managers/iDRAC.Embedded.1",
        "@odata.type": "#Manager.v1_3_3.Manager",
        "FirmwareVersion": "3.30.30.30"
    }"##;

    #[test]
    fn test_decode_keeps_raw_and_envelope() {
        let resource = Resource::decode_str(MANAGER).unwrap();
        assert_eq!(resource.odata.id, "/redfish/v1/Managers/iDRAC.Embedded.1");
        assert_eq!(resource.odata.odata_type, "#Manager.v1_3_3.Manager");
        assert_eq!(resource.raw, MANAGER.as_bytes());
        assert_eq!(resource.to_string(), MANAGER);
    }

    #[test]
    fn test_bytes_and_str_agree() {
        let from_bytes = Resource::decode(MANAGER.as_bytes()).unwrap();
        let from_str = Resource::decode_str(MANAGER).unwrap();
        assert_eq!(from_bytes, from_str);
        assert_eq!(from_bytes.to_string(), from_str.to_string());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(
            Resource::decode_str("<html><body>Login</body></html>"),
            Err(RedfishError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_raw_is_best_effort() {
        let resource = Resource::from_raw(b"<html></html>".to_vec());
        assert_eq!(resource.odata, ODataAnnotation::default());
        assert_eq!(resource.to_string(), "<html></html>");

        let resource = Resource::from_raw(MANAGER.as_bytes().to_vec());
        assert_eq!(resource.odata.id, "/redfish/v1/Managers/iDRAC.Embedded.1");
    }

    #[test]
    fn test_non_object_json_has_no_envelope() {
        let resource = Resource::decode_str(r#"["a","b","c"]"#).unwrap();
        assert_eq!(resource.odata, ODataAnnotation::default());
        assert_eq!(resource.to_string(), r#"["a","b","c"]"#);

        let resource = Resource::decode_str("42").unwrap();
        assert_eq!(resource.odata, ODataAnnotation::default());

        let resource = Resource::from_raw(br#"["a","b","c"]"#.to_vec());
        assert_eq!(resource.odata, ODataAnnotation::default());
    }

    #[test]
    fn test_envelope_with_wrong_type_is_parse_error() {
        assert!(matches!(
            Resource::decode_str(r#"{"@odata.id": 7}"#),
            Err(RedfishError::Parse { .. })
        ));
        assert_eq!(
            Resource::from_raw(br#"{"@odata.id": 7}"#.to_vec()).odata,
            ODataAnnotation::default()
        );
    }
}
