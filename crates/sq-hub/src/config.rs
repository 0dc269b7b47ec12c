//! # Hub Configuration
//!
//! Optional TOML file with serde defaults. Command-line flags override it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Default, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Attach a permissive CORS layer for browser front-ends.
    #[serde(default = "default_cors")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors: default_cors(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:4000".into()
}
fn default_cors() -> bool {
    true
}
fn default_data_path() -> PathBuf {
    PathBuf::from("data/sales_data.csv")
}

impl Config {
    /// Read `path` if it exists. Unreadable or invalid files fall back to
    /// defaults with a warning.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to read config {:?}: {}", path, e);
                return Config::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Invalid config {:?}, using defaults: {}", path, e);
                Config::default()
            }
        }
    }

    pub fn with_overrides(mut self, bind: Option<String>, data: Option<PathBuf>) -> Self {
        if let Some(bind) = bind {
            self.server.bind = bind;
        }
        if let Some(path) = data {
            self.data.path = path;
        }
        self
    }
}
