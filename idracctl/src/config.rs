//! CLI configuration management
//!
//! Resolves connection settings from flags, `IDRAC_API_*` environment
//! variables and an optional config file.

use crate::client::{Protocol, RedfishClient};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_HOST: &str = "IDRAC_API_HOST";
const ENV_PORT: &str = "IDRAC_API_PORT";
const ENV_PROTOCOL: &str = "IDRAC_API_PROTOCOL";
const ENV_USERNAME: &str = "IDRAC_API_USERNAME";
const ENV_PASSWORD: &str = "IDRAC_API_PASSWORD";
const ENV_VALIDATE_SERVER_CERT: &str = "IDRAC_API_VALIDATE_SERVER_CERT";
const ENV_FORMAT: &str = "IDRAC_API_FORMAT";

/// Resolved CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Hostname or IP address of the iDRAC
    pub host: String,

    pub port: u16,

    /// `http` or `https`
    pub protocol: String,

    pub username: String,

    pub password: String,

    /// Verify the server's TLS certificate
    pub validate_server_cert: bool,

    /// Default output format
    pub output_format: String,
}

impl CliConfig {
    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Default config file location, `<config dir>/idrac-redfish/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("idrac-redfish").join("config.toml"))
    }

    /// Copy of the configuration that is safe to print.
    pub fn masked(&self) -> Self {
        Self {
            password: "********".to_string(),
            ..self.clone()
        }
    }

    /// Build a client with every value applied through its validated setters.
    pub fn to_client(&self) -> Result<RedfishClient> {
        let mut client = RedfishClient::new().context("Failed to create Redfish client")?;
        client.set_host(self.host.as_str())?;
        client.set_port(self.port)?;
        client.set_protocol(&self.protocol)?;
        client.set_username(self.username.as_str())?;
        client.set_password(self.password.as_str())?;
        client.set_certificate_validation(self.validate_server_cert)?;
        Ok(client)
    }
}

/// Config file contents; every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    protocol: Option<String>,
    username: Option<String>,
    password: Option<String>,
    validate_server_cert: Option<bool>,
    output_format: Option<String>,
}

impl FileConfig {
    /// Parse a config file, picking the format from its extension.
    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match extension.as_str() {
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file extension '{}' for {}. Must be toml, yaml, yml or json",
                extension,
                path.display()
            )),
        }
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// `with_*` setters always overwrite. [`with_env_overrides`] and
/// [`with_config_file`] only fill values that are still unset, so applying
/// flags, then environment, then file yields (highest first):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Defaults
///
/// [`with_env_overrides`]: ConfigBuilder::with_env_overrides
/// [`with_config_file`]: ConfigBuilder::with_config_file
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    protocol: Option<String>,
    username: Option<String>,
    password: Option<String>,
    validate_server_cert: Option<bool>,
    output_format: Option<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Result<Self> {
        let host = host.into();
        Self::validate_not_empty("Host", &host)?;
        self.host = Some(host);
        Ok(self)
    }

    pub fn with_port(mut self, port: u16) -> Result<Self> {
        Self::validate_port(port)?;
        self.port = Some(port);
        Ok(self)
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Result<Self> {
        let protocol = protocol.into();
        Self::validate_protocol(&protocol)?;
        self.protocol = Some(protocol);
        Ok(self)
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Result<Self> {
        let username = username.into();
        Self::validate_not_empty("Username", &username)?;
        self.username = Some(username);
        Ok(self)
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Result<Self> {
        let password = password.into();
        Self::validate_not_empty("Password", &password)?;
        self.password = Some(password);
        Ok(self)
    }

    pub fn with_validate_server_cert(mut self, validate: bool) -> Self {
        self.validate_server_cert = Some(validate);
        self
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Fill unset values from `IDRAC_API_*` environment variables.
    ///
    /// Invalid values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if self.host.is_none() {
            self.host = env_var(ENV_HOST).filter(|h| Self::validate_not_empty("Host", h).is_ok());
        }

        if self.port.is_none() {
            self.port = env_var(ENV_PORT)
                .and_then(|p| p.parse().ok())
                .filter(|p| Self::validate_port(*p).is_ok());
        }

        if self.protocol.is_none() {
            self.protocol = env_var(ENV_PROTOCOL).filter(|p| Self::validate_protocol(p).is_ok());
        }

        if self.username.is_none() {
            self.username =
                env_var(ENV_USERNAME).filter(|u| Self::validate_not_empty("Username", u).is_ok());
        }

        if self.password.is_none() {
            self.password =
                env_var(ENV_PASSWORD).filter(|p| Self::validate_not_empty("Password", p).is_ok());
        }

        if self.validate_server_cert.is_none() {
            self.validate_server_cert = env_var(ENV_VALIDATE_SERVER_CERT)
                .map(|v| v.to_lowercase() == "true" || v == "1");
        }

        if self.output_format.is_none() {
            self.output_format =
                env_var(ENV_FORMAT).filter(|f| Self::validate_output_format(f).is_ok());
        }

        self
    }

    /// Fill unset values from a config file.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// used, and a missing default file is skipped.
    pub fn with_config_file(self, path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match CliConfig::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(self),
            },
        };

        let file = FileConfig::load(&path)?;

        Ok(Self {
            host: self.host.or(file.host),
            port: self.port.or(file.port),
            protocol: self.protocol.or(file.protocol),
            username: self.username.or(file.username),
            password: self.password.or(file.password),
            validate_server_cert: self.validate_server_cert.or(file.validate_server_cert),
            output_format: self.output_format.or(file.output_format),
        })
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let host = self
            .host
            .ok_or_else(|| missing_setting("host", "--host", ENV_HOST))?;
        let username = self
            .username
            .ok_or_else(|| missing_setting("username", "--username", ENV_USERNAME))?;
        let password = self
            .password
            .ok_or_else(|| missing_setting("password", "--password", ENV_PASSWORD))?;
        let protocol = self
            .protocol
            .unwrap_or_else(|| Protocol::default().to_string());
        let port = self.port.unwrap_or(443);
        let output_format = self.output_format.unwrap_or_else(|| "table".to_string());

        // Values from the config file have not been checked yet
        Self::validate_not_empty("Host", &host)?;
        Self::validate_not_empty("Username", &username)?;
        Self::validate_not_empty("Password", &password)?;
        Self::validate_protocol(&protocol)?;
        Self::validate_port(port)?;
        Self::validate_output_format(&output_format)?;

        Ok(CliConfig {
            host,
            port,
            protocol,
            username,
            password,
            validate_server_cert: self.validate_server_cert.unwrap_or(false),
            output_format,
        })
    }

    fn validate_not_empty(setting: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(anyhow::anyhow!("{} cannot be empty", setting));
        }
        Ok(())
    }

    fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(anyhow::anyhow!("Port must be greater than 0"));
        }
        Ok(())
    }

    fn validate_protocol(protocol: &str) -> Result<()> {
        protocol.parse::<Protocol>()?;
        Ok(())
    }

    /// Validate output format
    fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "table" | "json" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'table' or 'json'",
                format
            )),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn missing_setting(setting: &str, flag: &str, env: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "No {} configured. Pass {}, set {} or add it to the config file",
        setting,
        flag,
        env
    )
}
