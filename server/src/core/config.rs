//! Application configuration
//!
//! Resolution order: CLI/env flags take precedence over the optional JSON
//! config file, which takes precedence over built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::Cli;
use super::constants::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Shape of the on-disk config file; every field optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server: Option<ServerFileConfig>,
    #[serde(flatten)]
    extra: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
struct ServerFileConfig {
    host: Option<String>,
    port: Option<u16>,
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
            tracing::warn!(
                fields = %keys.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                let file = FileConfig::load_from_file(path)?;
                file.warn_unknown_fields();
                file
            }
            None => FileConfig::default(),
        };
        let file_server = file.server.unwrap_or_default();

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        tracing::debug!(host = %server.host, port = server.port, "Configuration loaded");
        Ok(Self { server })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn cli(config: Option<std::path::PathBuf>) -> Cli {
        Cli {
            host: None,
            port: None,
            config,
        }
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let config = AppConfig::load(&cli(None)).unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"server": {{"host": "0.0.0.0", "port": 9000}}}}"#).unwrap();
        let config = AppConfig::load(&cli(Some(file.path().to_path_buf()))).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"server": {{"port": 9000}}}}"#).unwrap();
        let mut cli = cli(Some(file.path().to_path_buf()));
        cli.port = Some(9100);
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, DEFAULT_HOST);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(AppConfig::load(&cli(Some(file.path().to_path_buf()))).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = AppConfig::load(&cli(Some("/no/such/config.json".into())));
        assert!(result.is_err());
    }
}
