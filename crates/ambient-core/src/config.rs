//! Configuration loading and typed config structures for the directory
//! service.
//!
//! The configuration lives in `ambient-config.yaml` next to the binary's
//! working directory. Every field has a default, so an absent file or an
//! absent section simply yields the defaults below.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default config file name looked up relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ambient-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `ambient-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ListenConfig,

    /// Seed document settings.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `AMBIENT_HOST` overrides `server.host`
    /// - `AMBIENT_PORT` overrides `server.port`
    /// - `AMBIENT_SEED_PATH` overrides `seed.path`
    /// - `AMBIENT_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a struct.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// Env overrides are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file exists but cannot be read
    /// or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Override values with process environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override values using an arbitrary key lookup.
    ///
    /// Split out from [`Self::apply_env_overrides`] so overrides can be
    /// exercised without mutating the process environment.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("AMBIENT_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("AMBIENT_PORT") {
            match val.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!(
                    value = %val,
                    error = %e,
                    "ignoring invalid AMBIENT_PORT override"
                ),
            }
        }
        if let Some(val) = lookup("AMBIENT_SEED_PATH") {
            self.seed.path = PathBuf::from(val);
        }
        if let Some(val) = lookup("AMBIENT_LOG_LEVEL") {
            self.logging.level = val;
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Seed document configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
    /// Path of the JSON seed document.
    #[serde(default = "default_seed_path")]
    pub path: PathBuf,

    /// Serve the built-in dataset when the seed file does not exist.
    ///
    /// Off by default: a missing seed is a startup failure.
    #[serde(default)]
    pub fallback_to_builtin: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            path: default_seed_path(),
            fallback_to_builtin: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    /// (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8000
}

fn default_seed_path() -> PathBuf {
    PathBuf::from("seedData.json")
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.seed.path, PathBuf::from("seedData.json"));
        assert!(!config.seed.fallback_to_builtin);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9090

seed:
  path: "/etc/ambient/seed.json"
  fallback_to_builtin: true

logging:
  level: "debug"
"#;

        let config = ServiceConfig::parse_yaml(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.seed.path, PathBuf::from("/etc/ambient/seed.json"));
        assert!(config.seed.fallback_to_builtin);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ServiceConfig::parse_yaml("server:\n  port: 8123\n").unwrap();
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.seed, SeedConfig::default());
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = ServiceConfig::parse_yaml("  \n").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = ServiceConfig::parse_yaml("server: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = ServiceConfig::from_file(Path::new("/nonexistent/ambient-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn overrides_replace_values() {
        let vars: BTreeMap<&str, &str> = [
            ("AMBIENT_HOST", "10.0.0.1"),
            ("AMBIENT_PORT", "7000"),
            ("AMBIENT_SEED_PATH", "fixtures/seed.json"),
            ("AMBIENT_LOG_LEVEL", "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = ServiceConfig::default();
        config.apply_overrides_from(|key| vars.get(key).map(|v| (*v).to_owned()));

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.seed.path, PathBuf::from("fixtures/seed.json"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn invalid_port_override_is_ignored() {
        let mut config = ServiceConfig::default();
        config.apply_overrides_from(|key| (key == "AMBIENT_PORT").then(|| "not-a-port".to_owned()));
        assert_eq!(config.server.port, 8000);
    }
}
