//! iDRAC Redfish Core Library
//!
//! Typed decoders for the documents a Dell iDRAC serves over Redfish,
//! plus the error type shared with the HTTP client. This crate does no
//! I/O of its own; collection expansion goes through [`ResourceFetcher`].

pub mod collection;
pub mod computer_system;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod info;
pub mod numeric;
pub mod odata;
pub mod resource;
pub mod types;

// Re-export commonly used types
pub use collection::{ComputerSystemCollection, ComputerSystemCollectionCounters};
pub use computer_system::{ActionEndpoint, ComputerSystem, ComputerSystemCounters};
pub use decode::Decode;
pub use error::*;
pub use fetch::ResourceFetcher;
pub use info::Info;
pub use odata::ODataAnnotation;
pub use resource::Resource;
pub use types::HealthStatus;

/// Path of the Redfish service root.
pub const ROOT_PATH: &str = "/redfish/v1/";

/// Upper bound on response body bytes read from an endpoint.
pub const RECEIVER_DATA_LIMIT: usize = 1_000_000;
