//! Shared decoding entry points

use crate::error::{RedfishError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// A Redfish document that can be decoded from a raw response body.
///
/// `decode_str` is a convenience wrapper and must behave exactly like
/// `decode` on the same content.
pub trait Decode: Sized {
    /// Decode from the raw response body.
    fn decode(bytes: &[u8]) -> Result<Self>;

    /// Decode from a string holding the response body.
    fn decode_str(s: &str) -> Result<Self> {
        Self::decode(s.as_bytes())
    }
}

/// Unmarshal a response shape, keeping the payload in the error.
pub(crate) fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| RedfishError::parse(e, bytes))
}

/// Payload text for error reporting.
pub(crate) fn payload_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// `deserialize_with` target that reads an explicit `null` as the default.
///
/// `#[serde(default)]` only covers absent keys; firmware also sends `null`
/// for objects, arrays and strings it has nothing to report in.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
