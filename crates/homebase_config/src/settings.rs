//! Configuration structures.

use crate::ApiKey;
use config::{Config, File, FileFormat};
use homebase_core::{GenerationConfig, SafetyThreshold, UnclassifiedPolicy};
use homebase_error::{ConfigError, HomebaseError, HomebaseResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../homebase.toml");

/// Gemini backend settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Model identifier
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Literal API key; takes precedence over `api_key_env`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API root, overridable for tests and proxies
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature in `[0, 2]`
    pub temperature: f32,
    /// Nucleus sampling mass in `[0, 1]`
    pub top_p: f32,
    /// Top-k cutoff; `0` omits it
    pub top_k: u32,
    /// Dangerous-content threshold
    pub safety_threshold: SafetyThreshold,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 120,
            temperature: 1.0,
            top_p: 0.95,
            top_k: 0,
            safety_threshold: SafetyThreshold::BlockNone,
        }
    }
}

impl GeminiSettings {
    /// Resolve the API key from the literal value or the environment.
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        ApiKey::resolve(self.api_key.as_deref(), &self.api_key_env)
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Retry loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total backend invocations allowed per run
    pub max_attempts: u32,
    /// Delay after deadline, content-policy and unclassified failures
    pub short_delay_ms: u64,
    /// Delay after quota exhaustion
    pub long_delay_ms: u64,
    /// Policy for failures the backend could not classify
    pub unclassified: UnclassifiedPolicy,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            short_delay_ms: 1000,
            long_delay_ms: 10_000,
            unclassified: UnclassifiedPolicy::Retry,
        }
    }
}

impl RetrySettings {
    /// Short delay as a duration.
    pub fn short_delay(&self) -> Duration {
        Duration::from_millis(self.short_delay_ms)
    }

    /// Long delay as a duration.
    pub fn long_delay(&self) -> Duration {
        Duration::from_millis(self.long_delay_ms)
    }
}

/// Uploaded file handling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileInputSettings {
    /// Maximum bytes of the file passed to the model
    pub byte_cap: usize,
}

impl Default for FileInputSettings {
    fn default() -> Self {
        Self { byte_cap: 900_000 }
    }
}

/// Places API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacesSettings {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Literal API key; takes precedence over `api_key_env`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API root
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Distance matrix unit system ("imperial" or "metric")
    pub units: String,
    /// `maxwidth` of generated photo URLs
    pub photo_max_width: u32,
}

impl Default for PlacesSettings {
    fn default() -> Self {
        Self {
            api_key_env: "PLACES_API_KEY".to_string(),
            api_key: None,
            base_url: "https://maps.googleapis.com".to_string(),
            timeout_secs: 10,
            units: "imperial".to_string(),
            photo_max_width: 400,
        }
    }
}

impl PlacesSettings {
    /// Resolve the API key from the literal value or the environment.
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        ApiKey::resolve(self.api_key.as_deref(), &self.api_key_env)
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Drive API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DriveSettings {
    /// API root
    pub base_url: String,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com".to_string(),
        }
    }
}

/// Complete Homebase configuration.
///
/// # Examples
///
/// ```
/// use homebase_config::HomebaseConfig;
///
/// let config = HomebaseConfig::default();
/// assert_eq!(config.retry.max_attempts, 2);
/// assert_eq!(config.file_input.byte_cap, 900_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HomebaseConfig {
    /// Generation backend
    pub gemini: GeminiSettings,
    /// Retry loop
    pub retry: RetrySettings,
    /// File input variant
    pub file_input: FileInputSettings,
    /// Places lookups
    pub places: PlacesSettings,
    /// Drive downloads
    pub drive: DriveSettings,
}

impl HomebaseConfig {
    /// Load configuration from a specific file path.
    ///
    /// Values missing from the file take their built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> HomebaseResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                HomebaseError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(parse_error)?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> HomebaseResult<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (homebase.toml shipped with the library)
    /// 2. User config in home directory (~/.config/homebase/homebase.toml)
    /// 3. User config in current directory (./homebase.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use homebase_config::HomebaseConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = HomebaseConfig::load()?;
    /// println!("model: {}", config.gemini.model);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> HomebaseResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/homebase/homebase.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("homebase").required(false));

        let config: Self = builder
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::new("retry.max_attempts must be at least 1"));
        }
        if self.file_input.byte_cap == 0 {
            return Err(ConfigError::new("file_input.byte_cap must be at least 1"));
        }
        self.to_generation_config().map(|_| ())
    }

    /// Sampling and safety parameters for generation requests.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a parameter is out of range.
    pub fn to_generation_config(&self) -> Result<GenerationConfig, ConfigError> {
        GenerationConfig::builder()
            .temperature(self.gemini.temperature)
            .top_p(self.gemini.top_p)
            .top_k(self.gemini.top_k)
            .safety_threshold(self.gemini.safety_threshold)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid [gemini] settings: {}", e)))
    }
}

fn build_error(e: config::ConfigError) -> HomebaseError {
    HomebaseError::from(ConfigError::new(format!(
        "Failed to build configuration: {}",
        e
    )))
}

fn parse_error(e: config::ConfigError) -> HomebaseError {
    HomebaseError::from(ConfigError::new(format!(
        "Failed to parse configuration: {}",
        e
    )))
}
