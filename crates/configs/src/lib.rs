use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

/// How the next product id is derived from the current collection.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Last element's id + 1. Can collide after deletions or reordering.
    #[default]
    LastPlusOne,
    /// Largest id in the collection + 1.
    MaxPlusOne,
}

/// Whether read-modify-write cycles against the data file are serialized.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Overlapping mutations may lose updates; last writer wins.
    #[default]
    Unguarded,
    /// One mutation at a time per process.
    Serialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,
    #[serde(default = "default_true")]
    pub seed_if_missing: bool,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default)]
    pub write_mode: WriteMode,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            public_dir: default_public_dir(),
            index_file: default_index_file(),
            seed_if_missing: true,
            id_strategy: IdStrategy::default(),
            write_mode: WriteMode::default(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3000 }
fn default_data_file() -> PathBuf { PathBuf::from("data/full-products.json") }
fn default_public_dir() -> PathBuf { PathBuf::from("public") }
fn default_index_file() -> PathBuf { PathBuf::from("index.html") }
fn default_true() -> bool { true }

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, defaults otherwise; environment overrides
    /// are applied on top and the result is validated. A config file that
    /// exists but does not parse is an error.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(content) => parse(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
            Err(e) => return Err(anyhow!("cannot read {path}: {e}")),
        };
        cfg.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `HOST`, `PORT`, `TOKIO_WORKER_THREADS` and `PRODUCTS_FILE`.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    fn apply_env_with<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(file) = get("PRODUCTS_FILE").filter(|f| !f.trim().is_empty()) {
            self.storage.data_file = PathBuf::from(file);
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_file must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.storage.data_file, PathBuf::from("data/full-products.json"));
        assert_eq!(cfg.storage.id_strategy, IdStrategy::LastPlusOne);
        assert_eq!(cfg.storage.write_mode, WriteMode::Unguarded);
        assert!(cfg.storage.seed_if_missing);
    }

    #[test]
    fn parses_storage_policies() {
        let cfg = parse(
            r#"
            [server]
            port = 8080
            [storage]
            data_file = "/tmp/p.json"
            id_strategy = "max_plus_one"
            write_mode = "serialized"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.data_file, PathBuf::from("/tmp/p.json"));
        assert_eq!(cfg.storage.id_strategy, IdStrategy::MaxPlusOne);
        assert_eq!(cfg.storage.write_mode, WriteMode::Serialized);
    }

    #[test]
    fn env_overrides_port_and_ignores_garbage() {
        let vars: HashMap<&str, &str> =
            [("PORT", "4100"), ("TOKIO_WORKER_THREADS", "many"), ("PRODUCTS_FILE", "x.json")].into();
        let mut cfg = AppConfig::default();
        cfg.apply_env_with(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.server.port, 4100);
        assert_eq!(cfg.server.worker_threads, None);
        assert_eq!(cfg.storage.data_file, PathBuf::from("x.json"));

        let mut cfg = AppConfig::default();
        cfg.apply_env_with(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        assert!(load_from_file("/nonexistent/product-store-config.toml").is_err());
    }

    #[test]
    fn validation_rejects_zero_port_and_fixes_blank_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.worker_threads, None);

        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
