//! Client configuration from environment variables.

use core::str::FromStr;
use std::path::PathBuf;

use anyhow::Context;

use gatehouse_observability::LogFormat;
use gatehouse_storage::DEFAULT_STORAGE_KEY;

pub const ENV_STORAGE_BACKEND: &str = "GATEHOUSE_STORAGE_BACKEND";
pub const ENV_DATA_DIR: &str = "GATEHOUSE_DATA_DIR";
pub const ENV_STORAGE_KEY: &str = "GATEHOUSE_STORAGE_KEY";
pub const ENV_LOG_FORMAT: &str = "GATEHOUSE_LOG_FORMAT";

const SQLITE_FILE_NAME: &str = "gatehouse.db";

/// Which key/value backend holds the entity collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local, lost on exit.
    Memory,
    /// One file per key under the data directory.
    #[default]
    File,
    /// `gatehouse.db` under the data directory.
    Sqlite,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File => "file",
            StorageBackend::Sqlite => "sqlite",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => anyhow::bail!("unknown storage backend: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend: StorageBackend,
    /// Explicit data directory; `None` means the OS app data directory.
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ClientConfig {
    /// Process-local configuration, for tests and demos.
    pub fn in_memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_STORAGE_BACKEND) {
            config.backend = raw
                .parse::<StorageBackend>()
                .with_context(|| format!("invalid {ENV_STORAGE_BACKEND}"))?;
        }
        if let Some(dir) = get(ENV_DATA_DIR) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = get(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {ENV_LOG_FORMAT}"))?;
        }

        Ok(config)
    }

    /// Data directory: the configured one, or `{app_data_dir}/gatehouse`.
    pub fn resolve_data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let mut dir = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("no OS data directory: tried data_dir() and home_dir()/.local/share")?;
        dir.push("gatehouse");
        Ok(dir)
    }

    pub fn sqlite_path(&self) -> anyhow::Result<PathBuf> {
        Ok(self.resolve_data_dir()?.join(SQLITE_FILE_NAME))
    }
}
