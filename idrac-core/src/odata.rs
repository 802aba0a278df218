//! OData instance annotations shared by every Redfish document

use crate::decode::null_as_default;
use serde::{Deserialize, Serialize};

/// The `@odata.id` / `@odata.type` / `@odata.context` envelope.
///
/// Redfish documents carry these keys at the top level and on every
/// link object. Response shapes embed this struct with `#[serde(flatten)]`
/// so all decoders extract it the same way. Output uses plain
/// `id`/`type`/`context` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ODataAnnotation {
    #[serde(rename(deserialize = "@odata.id", serialize = "id"))]
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename(deserialize = "@odata.type", serialize = "type"))]
    #[serde(deserialize_with = "null_as_default")]
    pub odata_type: String,
    #[serde(rename(deserialize = "@odata.context", serialize = "context"))]
    #[serde(deserialize_with = "null_as_default")]
    pub context: String,
}

impl ODataAnnotation {
    pub fn new(
        id: impl Into<String>,
        odata_type: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            odata_type: odata_type.into(),
            context: context.into(),
        }
    }

    /// Resource path of the annotated object with exactly one trailing slash.
    pub fn resource_path(&self) -> String {
        if self.id.ends_with('/') {
            self.id.clone()
        } else {
            format!("{}/", self.id)
        }
    }
}
