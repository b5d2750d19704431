// Server configuration: defaults <- TOML file <- MASAL__* environment

use config::{Config, Environment, File, FileFormat};
use masal_spk::SpeechConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Prefix of environment overrides, e.g. `MASAL__HTTP__PORT=9000`.
pub const ENV_PREFIX: &str = "MASAL";
/// Separator between nested keys in environment overrides.
pub const ENV_SEPARATOR: &str = "__";
/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "masal.toml";

#[derive(Error, Debug)]
pub enum ServerConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http: HttpConfig,
    pub log: LogConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "masal_spk=debug,info". `RUST_LOG` wins when set.
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `path` (or `masal.toml` if present) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ServerConfigError> {
        Self::load_with_env(path, default_environment())
    }

    /// Load configuration with an explicit environment source
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ServerConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let config: ServerConfig = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ServerConfigError> {
        if self.http.host.trim().is_empty() {
            return Err(ServerConfigError::Invalid("http.host cannot be empty".to_string()));
        }

        if self.log.level.trim().is_empty() {
            return Err(ServerConfigError::Invalid("log.level cannot be empty".to_string()));
        }

        self.speech.validate().map_err(ServerConfigError::Invalid)
    }
}

/// `MASAL__SECTION__KEY` environment source
pub fn default_environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
