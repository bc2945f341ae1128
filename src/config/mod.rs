use std::path::Path;
use std::{fs, io};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::host::{DEFAULT_ADDRESS, DEFAULT_PORT};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Root {
    /// Where to send commands.
    pub bridge: Bridge,
    /// Diagnostic verbosity, warnings only by default.
    pub log_level: LevelFilter,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Bridge {
    /// Bridge hostname or IP address.
    pub address: String,
    /// Bridge UDP port.
    pub port: u16,
}

impl Default for Root {
    fn default() -> Self {
        Root {
            bridge: Bridge::default(),
            log_level: LevelFilter::Warn,
        }
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Bridge {
            address: DEFAULT_ADDRESS.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(text: &str) -> Result<Root, ConfigError> {
    Ok(serde_yaml::from_str(text)?)
}

pub fn read_config_yaml<T: AsRef<Path>>(path: T) -> Result<Root, ConfigError> {
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    Ok(serde_yaml::from_reader(reader)?)
}

pub fn read_config_json<T: AsRef<Path>>(path: T) -> Result<Root, ConfigError> {
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Pick a reader by file extension; anything but `.json` is read as YAML.
pub fn read_config<T: AsRef<Path>>(path: T) -> Result<Root, ConfigError> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => read_config_json(path),
        _ => read_config_yaml(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let root = from_yaml_str("{}").unwrap();
        assert_eq!(root, Root::default());
        assert_eq!(root.bridge.address, "255.255.255.255");
        assert_eq!(root.bridge.port, 8899);
        assert_eq!(root.log_level, LevelFilter::Warn);
    }

    #[test]
    fn yaml_overrides() {
        let root = from_yaml_str("bridge:\n  address: 10.0.88.50\nlogLevel: debug\n").unwrap();
        assert_eq!(root.bridge.address, "10.0.88.50");
        assert_eq!(root.bridge.port, 8899);
        assert_eq!(root.log_level, LevelFilter::Debug);
    }

    #[test]
    fn json_config() {
        let root: Root =
            serde_json::from_str(r#"{"bridge": {"port": 50000}, "logLevel": "off"}"#).unwrap();
        assert_eq!(root.bridge.address, DEFAULT_ADDRESS);
        assert_eq!(root.bridge.port, 50000);
        assert_eq!(root.log_level, LevelFilter::Off);
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(matches!(
            from_yaml_str("bridge:\n  port: 70000\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_config("/nonexistent/milight.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
