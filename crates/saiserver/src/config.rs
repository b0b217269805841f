//! Configuration file support for saiserver
//!
//! Loads and validates the server configuration from a TOML file. A missing
//! file is not an error; every field has a default. Command line flags are
//! applied on top by the binary.

use crate::codec::UnsupportedPolicy;
use crate::error::{Result, ServerError};
use log::info;
use sai_types::MacAddress;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// RPC listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Switch bootstrap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Source MAC programmed at switch create
    #[serde(default = "default_src_mac")]
    pub src_mac: String,

    /// Keep the vendor diagnostic shell enabled
    #[serde(default)]
    pub diag_shell: bool,

    #[serde(default = "default_diag_shell_start_delay")]
    pub diag_shell_start_delay_ms: u64,

    #[serde(default = "default_diag_shell_interval")]
    pub diag_shell_interval_ms: u64,

    /// Front panel ports of the in-memory driver
    #[serde(default = "default_front_port_count")]
    pub front_port_count: u32,
}

/// Attribute codec configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub unsupported_policy: UnsupportedPolicy,
}

/// Complete saiserver configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenerConfig,

    #[serde(default)]
    pub switch: SwitchConfig,

    #[serde(default)]
    pub codec: CodecConfig,
}

// Default functions
fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9090
}

fn default_src_mac() -> String {
    "11:22:33:44:55:66".to_string()
}

fn default_diag_shell_start_delay() -> u64 {
    2000
}

fn default_diag_shell_interval() -> u64 {
    1000
}

fn default_front_port_count() -> u32 {
    32
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
        }
    }
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            src_mac: default_src_mac(),
            diag_shell: false,
            diag_shell_start_delay_ms: default_diag_shell_start_delay(),
            diag_shell_interval_ms: default_diag_shell_interval(),
            front_port_count: default_front_port_count(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).map_err(|e| {
                ServerError::Configuration(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ServerError::file_read(path, e)),
        }
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `listen:port` for the RPC listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.listen, self.server.port)
    }

    /// The validated source MAC.
    pub fn src_mac(&self) -> Result<MacAddress> {
        self.switch.src_mac.parse().map_err(|e| {
            ServerError::Configuration(format!("src_mac '{}': {}", self.switch.src_mac, e))
        })
    }

    pub fn diag_shell_start_delay(&self) -> Duration {
        Duration::from_millis(self.switch.diag_shell_start_delay_ms)
    }

    pub fn diag_shell_interval(&self) -> Duration {
        Duration::from_millis(self.switch.diag_shell_interval_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Configuration("port must be > 0".to_string()));
        }

        self.src_mac()?;

        if self.switch.diag_shell_interval_ms == 0 {
            return Err(ServerError::Configuration(
                "diag_shell_interval_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.server.listen, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.switch.src_mac, "11:22:33:44:55:66");
        assert!(!config.switch.diag_shell);
        assert_eq!(config.codec.unsupported_policy, UnsupportedPolicy::Skip);
        assert_eq!(config.bind_address(), "0.0.0.0:9090");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_src_mac() {
        let mut config = ServerConfig::default();
        config.switch.src_mac = "11:22:33:44:55".to_string();
        assert!(matches!(
            config.validate(),
            Err(ServerError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_zero_interval() {
        let mut config = ServerConfig::default();
        config.switch.diag_shell_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_durations() {
        let config = ServerConfig::default();
        assert_eq!(config.diag_shell_start_delay(), Duration::from_secs(2));
        assert_eq!(config.diag_shell_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
[server]
port = 9191

[switch]
diag_shell = true

[codec]
unsupported_policy = "strict"
"#;
        let config = ServerConfig::parse(toml_str).unwrap();
        assert_eq!(config.server.port, 9191);
        // Unspecified values should use defaults
        assert_eq!(config.server.listen, "0.0.0.0");
        assert!(config.switch.diag_shell);
        assert_eq!(config.switch.front_port_count, 32);
        assert_eq!(config.codec.unsupported_policy, UnsupportedPolicy::Strict);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[switch]\nsrc_mac = \"02:00:00:00:00:01\"").unwrap();
        let config = ServerConfig::load_or_default(file.path()).unwrap();
        assert_eq!(
            config.src_mac().unwrap(),
            MacAddress::new([0x02, 0, 0, 0, 0, 1])
        );
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"x\"").unwrap();
        assert!(ServerConfig::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_nonexistent_file_defaults() {
        let config = ServerConfig::load_or_default("/nonexistent/saiserver.toml").unwrap();
        assert_eq!(config.server.port, 9090);
    }
}
