//! Server configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file
//! (`diceroll.toml` unless another path is given), then `DICEROLL_*`
//! environment variables. Command-line flags are applied on top by the binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "diceroll.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DICEROLL_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            static_dir: PathBuf::from("static"),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// The provider stack, without extracting
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load from defaults, `diceroll.toml` if present, and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load with an explicit config file, which must exist
    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        if !file.exists() {
            return Err(ConfigError::MissingFile(file.to_path_buf()));
        }
        Self::extract(file)
    }

    fn extract(file: &Path) -> Result<Self, ConfigError> {
        Self::figment(file).extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }
}
