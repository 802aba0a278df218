//! HTTP client for Dell iDRAC Redfish endpoints.

mod transport;

use async_trait::async_trait;
use idrac_core::{
    ComputerSystem, ComputerSystemCollection, Decode, Info, RedfishError, Resource,
    ResourceFetcher, Result, RECEIVER_DATA_LIMIT, ROOT_PATH,
};
use reqwest::{Client, Method};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Time allowed for TCP connect plus the TLS handshake.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Time allowed for a whole request, body included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// URL scheme used to reach the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    /// Port implied by the scheme, omitted from the base URL.
    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }
}

impl FromStr for Protocol {
    type Err = RedfishError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(RedfishError::Config(format!(
                "supported protocols: http, https; unsupported protocol: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named high-level operation, as listed by `idracctl operations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
}

const OPERATIONS: &[Operation] = &[
    Operation {
        name: "get-info",
        description: "Get basic information about a remote Redfish API endpoint",
    },
    Operation {
        name: "get-systems",
        description: "Get information about computer systems exposed via Redfish API",
    },
    Operation {
        name: "get-system-collection",
        description: "List the members of the computer system collection",
    },
    Operation {
        name: "get-system",
        description: "Get a single computer system by its resource path",
    },
    Operation {
        name: "get-resource",
        description: "Fetch an arbitrary Redfish resource and print it verbatim",
    },
];

/// Client for the iDRAC flavour of the Redfish API.
///
/// Configuration is applied through validated setters; every operation is
/// a single GET (or, for [`get_computer_systems`](Self::get_computer_systems),
/// one GET per collection member) with no retries.
///
/// # Examples
///
/// ```no_run
/// use idracctl::client::RedfishClient;
///
/// # async fn example() -> anyhow::Result<()> {
/// let mut client = RedfishClient::new()?;
/// client.set_host("idrac.example.net")?;
/// client.set_username("root")?;
/// client.set_password("calvin")?;
///
/// let info = client.get_info().await?;
/// println!("Redfish version: {}", info.redfish_version);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RedfishClient {
    http: Client,
    host: String,
    port: u16,
    protocol: Protocol,
    username: String,
    password: String,
    certificate_validation: bool,
    root_path: String,
    base_url: String,
    data_limit: usize,
}

impl fmt::Debug for RedfishClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedfishClient")
            .field("base_url", &self.base_url)
            .field("root_path", &self.root_path)
            .field("username", &self.username)
            .field("password", &"********")
            .field("certificate_validation", &self.certificate_validation)
            .finish()
    }
}

impl RedfishClient {
    /// Create a client for `https` on port 443 with certificate validation off.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let protocol = Protocol::default();
        let mut client = Self {
            http: build_http_client(false)?,
            host: String::new(),
            port: protocol.default_port(),
            protocol,
            username: String::new(),
            password: String::new(),
            certificate_validation: false,
            root_path: ROOT_PATH.to_string(),
            base_url: String::new(),
            data_limit: RECEIVER_DATA_LIMIT,
        };
        client.rebase_url();
        Ok(client)
    }

    fn rebase_url(&mut self) {
        self.base_url = if self.port == self.protocol.default_port() {
            format!("{}://{}", self.protocol, self.host)
        } else {
            format!("{}://{}:{}", self.protocol, self.host, self.port)
        };
    }

    /// Set the target hostname or IP address.
    pub fn set_host(&mut self, host: impl Into<String>) -> Result<()> {
        let host = host.into();
        if host.is_empty() {
            return Err(RedfishError::Config(
                "empty hostname or ip address".to_string(),
            ));
        }
        self.host = host;
        self.rebase_url();
        Ok(())
    }

    pub fn set_port(&mut self, port: u16) -> Result<()> {
        if port == 0 {
            return Err(RedfishError::Config(format!("invalid port: {}", port)));
        }
        self.port = port;
        self.rebase_url();
        Ok(())
    }

    /// Set the protocol, `"http"` or `"https"`.
    pub fn set_protocol(&mut self, protocol: &str) -> Result<()> {
        self.protocol = protocol.parse()?;
        self.rebase_url();
        Ok(())
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> Result<()> {
        let username = username.into();
        if username.is_empty() {
            return Err(RedfishError::Config("empty username".to_string()));
        }
        self.username = username;
        Ok(())
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> Result<()> {
        let password = password.into();
        if password.is_empty() {
            return Err(RedfishError::Config("empty password".to_string()));
        }
        self.password = password;
        Ok(())
    }

    /// Enable or disable server certificate validation.
    ///
    /// Rebuilds the HTTP client, so only the error path of that can fail.
    pub fn set_certificate_validation(&mut self, enabled: bool) -> Result<()> {
        self.http = build_http_client(enabled)?;
        self.certificate_validation = enabled;
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub fn certificate_validation(&self) -> bool {
        self.certificate_validation
    }

    /// The operations this client supports, for discovery and help output.
    pub fn get_operations() -> &'static [Operation] {
        OPERATIONS
    }

    async fn get<T: Decode>(&self, path: &str) -> Result<T> {
        let body = self.call_api(Method::GET, None, path, None).await?;
        T::decode(&body)
    }

    /// Fetch the service root.
    pub async fn get_info(&self) -> Result<Info> {
        self.get(&self.root_path).await
    }

    /// Fetch any resource by path, keeping the body verbatim.
    pub async fn get_resource(&self, path: &str) -> Result<Resource> {
        self.get(path).await
    }

    /// Fetch `Systems/` under the root path without expanding its members.
    pub async fn get_computer_system_collection(&self) -> Result<ComputerSystemCollection> {
        self.get(&format!("{}Systems/", self.root_path)).await
    }

    /// Fetch the systems collection and every system it lists, in order.
    pub async fn get_computer_systems(&self) -> Result<Vec<ComputerSystem>> {
        let mut collection = self.get_computer_system_collection().await?;
        collection.resolve_computer_systems(self).await?;
        Ok(collection.computer_systems)
    }

    /// Fetch one computer system, e.g. `/redfish/v1/Systems/System.Embedded.1/`.
    pub async fn get_computer_system_by_resource_id(&self, path: &str) -> Result<ComputerSystem> {
        self.get(path).await
    }
}

#[async_trait]
impl ResourceFetcher for RedfishClient {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        self.call_api(Method::GET, None, path, None).await
    }
}

fn build_http_client(certificate_validation: bool) -> Result<Client> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .danger_accept_invalid_certs(!certificate_validation)
        .user_agent(concat!("idracctl/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| RedfishError::Config(format!("failed to create HTTP client: {}", e)))
}
