//! Error types for the iDRAC Redfish client

use thiserror::Error;

/// Core error type for Redfish operations
#[derive(Error, Debug)]
pub enum RedfishError {
    /// Invalid client configuration, rejected by a setter
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection, TLS or timeout failure before a response was received
    #[error("Transport error at {url}: {message}")]
    Transport { url: String, message: String },

    /// The connection produced no response object at all
    #[error("Empty response, verify url: {url}")]
    EmptyResponse { url: String },

    /// The server answered with anything other than 200
    #[error("error: status code {status}: {body}")]
    Status { status: u16, body: String },

    /// The payload is not valid JSON for the expected document
    #[error("parsing error: {message}, server response: {payload}")]
    Parse { message: String, payload: String },

    /// JSON parsed, but a field that identifies the document is empty
    #[error("missing mandatory field '{field}' in server response: {payload}")]
    MissingField {
        field: &'static str,
        payload: String,
    },

    /// A coercible field carried a JSON type that cannot be coerced
    #[error("unsupported type {found} for '{field}' in server response: {payload}")]
    UnsupportedType {
        field: &'static str,
        found: &'static str,
        payload: String,
    },
}

/// Result type alias for Redfish operations
pub type Result<T> = std::result::Result<T, RedfishError>;

impl RedfishError {
    /// Build a parse error from a serde failure and the offending payload.
    pub fn parse(err: serde_json::Error, payload: &[u8]) -> Self {
        RedfishError::Parse {
            message: err.to_string(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        }
    }

    /// HTTP status code carried by a [`RedfishError::Status`] error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RedfishError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_keeps_payload() {
        let payload = b"<html>not json</html>";
        let json_err = serde_json::from_slice::<serde_json::Value>(payload).unwrap_err();
        let err = RedfishError::parse(json_err, payload);

        match err {
            RedfishError::Parse { message, payload } => {
                assert!(!message.is_empty());
                assert_eq!(payload, "<html>not json</html>");
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_status_code() {
        let err = RedfishError::Status {
            status: 401,
            body: "denied".to_string(),
        };
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(RedfishError::Config("x".to_string()).status_code(), None);
    }

    #[test]
    fn test_error_display() {
        let err = RedfishError::Config("empty username".to_string());
        assert_eq!(format!("{}", err), "Configuration error: empty username");

        let err = RedfishError::Status {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(format!("{}", err), "error: status code 404: not found");

        let err = RedfishError::EmptyResponse {
            url: "https://10.0.0.1/redfish/v1/".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Empty response, verify url: https://10.0.0.1/redfish/v1/"
        );

        let err = RedfishError::MissingField {
            field: "RedfishVersion",
            payload: "{}".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "missing mandatory field 'RedfishVersion' in server response: {}"
        );
    }
}
