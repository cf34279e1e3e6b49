use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DaemonConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

impl DaemonConfig {
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config file {}", config_path.display()))?;
            return Self::parse(&raw)
                .with_context(|| format!("failed to parse TOML from {}", config_path.display()));
        }

        Ok(DaemonConfig::default())
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var("TYPEAHEAD_CONFIG") {
        return Path::new(&path).to_path_buf();
    }

    if let Some(base) = dirs::config_dir() {
        return base.join("typeahead").join("config.toml");
    }

    Path::new("/tmp/typeahead.toml").to_path_buf()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
        }
    }
}

fn default_socket_path() -> PathBuf {
    Path::new("/tmp/typeahead.sock").to_path_buf()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://diykd2rwv0.execute-api.us-east-1.amazonaws.com/typeahead".to_string()
}

// Cold starts on the suggestion endpoint take a few seconds.
fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    concat!("typeahead-daemon/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_blur_grace_ms")]
    pub blur_grace_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            blur_grace_ms: default_blur_grace_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_blur_grace_ms() -> u64 {
    50
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_backend")]
    pub backend: SourceBackend,
    #[serde(default)]
    pub fixed_names: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            fixed_names: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceBackend {
    Http,
    Fixed,
}

fn default_backend() -> SourceBackend {
    SourceBackend::Http
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DaemonConfig::parse("").unwrap();
        assert_eq!(config.input.debounce_ms, 250);
        assert_eq!(config.input.blur_grace_ms, 50);
        assert_eq!(config.source.backend, SourceBackend::Http);
        assert!(config.endpoint.base_url.ends_with("/typeahead"));
        assert_eq!(config.server.socket_path, PathBuf::from("/tmp/typeahead.sock"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let raw = r#"
            [input]
            debounce_ms = 100

            [source]
            backend = "fixed"
            fixed_names = ["Alice", "Bob"]
        "#;
        let config = DaemonConfig::parse(raw).unwrap();
        assert_eq!(config.input.debounce_ms, 100);
        assert_eq!(config.input.blur_grace_ms, 50);
        assert_eq!(config.source.backend, SourceBackend::Fixed);
        assert_eq!(config.source.fixed_names, ["Alice", "Bob"]);
        assert_eq!(config.endpoint.request_timeout_ms, 10_000);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(DaemonConfig::parse("[source]\nbackend = \"grpc\"").is_err());
    }
}
