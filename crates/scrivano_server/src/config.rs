//! Server configuration.
//!
//! Loads TOML configuration with a precedence system: bundled defaults, then
//! `~/.config/scrivano/scrivano.toml`, then `./scrivano.toml`.

use config::{Config, File, FileFormat};
use scrivano_error::ConfigError;
use scrivano_pipeline::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Listen address settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSection {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl ServerSection {
    /// The bindable address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Collaborator model selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelsSection {
    /// Model for enhancement and generation
    pub content_model: String,
    /// Model for speech synthesis
    pub tts_model: String,
    /// Prebuilt voice name
    pub voice: String,
}

/// Synthesis retry settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RetrySection {
    /// Attempt bound, including the first call
    pub max_attempts: u32,
    /// Base backoff delay in seconds
    pub base_delay_secs: u64,
    /// Substrings marking an error as transient
    pub transient_markers: Vec<String>,
}

impl RetrySection {
    /// Build the retry policy these settings describe.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_secs(self.base_delay_secs),
            self.transient_markers.clone(),
        )
    }
}

/// Store backend selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreSection {
    /// "memory" or "file"
    pub backend: String,
    /// Base directory for the file backend
    pub path: String,
}

/// Top-level Scrivano configuration.
///
/// # Example
///
/// ```no_run
/// use scrivano_server::ScrivanoConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScrivanoConfig::load()?;
/// println!("Listening on {}", config.server.addr());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrivanoConfig {
    /// Listen address
    pub server: ServerSection,
    /// Collaborator models
    pub models: ModelsSection,
    /// Synthesis retry policy
    pub retry: RetrySection,
    /// Store backend
    pub store: StoreSection,
}

impl ScrivanoConfig {
    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override
    /// earlier):
    /// 1. Bundled defaults (scrivano.toml shipped with the workspace)
    /// 2. User config in home directory (~/.config/scrivano/scrivano.toml)
    /// 3. User config in current directory (./scrivano.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be read or parsed.
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../scrivano.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scrivano/scrivano.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("scrivano").required(false));

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }
}
