//! iDRAC Redfish CLI Library
//!
//! This library provides the HTTP side of the iDRAC Redfish client: the
//! [`client::RedfishClient`] facade and its transport, plus the
//! configuration types used by the `idracctl` binary.
//!
//! ```no_run
//! use idracctl::client::RedfishClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut client = RedfishClient::new()?;
//! client.set_host("idrac.example.net")?;
//! client.set_username("root")?;
//! client.set_password("calvin")?;
//!
//! for system in client.get_computer_systems().await? {
//!     println!("{} {}", system.id, system.model);
//! }
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for Redfish endpoints.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

#[cfg(test)]
pub mod test_utils;
