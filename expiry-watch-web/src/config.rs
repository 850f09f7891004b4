//! Server configuration.
//!
//! Sources, later ones winning: built-in defaults, the TOML file named by
//! `EXPIRY_WATCH_CONFIG` (or `expiry-watch.toml` when present), then the
//! `DB_DSN`, `LISTEN_ADDR` and `RUST_LOG` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use expiry_watch_core::types::ProbeTimeouts;
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "EXPIRY_WATCH_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "expiry-watch.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub probe: ProbeConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub connect_timeout_secs: u64,
    pub handshake_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `info` or `info,sqlx=warn`
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub directory: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            workers: num_cpus::get(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("expiry-watch.db"),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        let defaults = ProbeTimeouts::default();
        Self {
            connect_timeout_secs: defaults.connect.as_secs(),
            handshake_timeout_secs: defaults.handshake.as_secs(),
        }
    }
}

impl ProbeConfig {
    pub fn timeouts(&self) -> ProbeTimeouts {
        ProbeTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            handshake: Duration::from_secs(self.handshake_timeout_secs),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Resolve the configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dsn) = lookup("DB_DSN") {
            self.database.path = database_path_from_dsn(&dsn);
        }
        if let Some(listen) = lookup("LISTEN_ADDR") {
            self.server.listen = normalize_listen_addr(&listen);
        }
        if let Some(level) = lookup("RUST_LOG") {
            self.log.level = level;
        }
    }
}

/// File path of a SQLite DSN: `sqlite://data/app.db?mode=rwc` → `data/app.db`.
pub fn database_path_from_dsn(dsn: &str) -> PathBuf {
    let dsn = dsn.trim();
    let without_scheme = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))
        .or_else(|| dsn.strip_prefix("file:"))
        .unwrap_or(dsn);
    let path = without_scheme
        .split_once('?')
        .map_or(without_scheme, |(path, _)| path);
    PathBuf::from(path)
}

/// A port-only address such as `:8080` binds every interface.
fn normalize_listen_addr(listen: &str) -> String {
    let listen = listen.trim();
    if listen.starts_with(':') {
        format!("0.0.0.0{listen}")
    } else {
        listen.to_string()
    }
}
