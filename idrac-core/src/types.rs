//! Small structures shared across Redfish resources

use serde::{Deserialize, Serialize};

/// Redfish `Status` object.
///
/// Some firmware emits `null` for any of the three members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    #[serde(rename(deserialize = "Health"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    #[serde(rename(deserialize = "HealthRollup"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_rollup: Option<String>,
    #[serde(rename(deserialize = "State"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl HealthStatus {
    /// Health, falling back to the rollup when the component itself is silent.
    pub fn summary(&self) -> Option<&str> {
        self.health
            .as_deref()
            .or(self.health_rollup.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_with_nulls() {
        let json = r#"{"Health": null, "HealthRollup": "OK", "State": "Enabled"}"#;
        let status: HealthStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.health, None);
        assert_eq!(status.health_rollup.as_deref(), Some("OK"));
        assert_eq!(status.state.as_deref(), Some("Enabled"));
        assert_eq!(status.summary(), Some("OK"));
    }

    #[test]
    fn test_serialize_skips_missing() {
        let status = HealthStatus {
            health: Some("Warning".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value, serde_json::json!({"health": "Warning"}));
    }
}
