//! API key resolution.

use homebase_error::ConfigError;
use tracing::{debug, instrument};

/// A resolved API key.
///
/// `Debug` output is redacted so keys never reach the logs.
///
/// # Examples
///
/// ```
/// use homebase_config::ApiKey;
///
/// let key = ApiKey::resolve(Some("literal-key"), "HOMEBASE_DOC_UNSET_VAR").unwrap();
/// assert_eq!(key.expose(), "literal-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(***)");
///
/// assert!(ApiKey::resolve(None, "HOMEBASE_DOC_UNSET_VAR").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key obtained elsewhere.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Prefer the explicit key, otherwise read `env_var`.
    ///
    /// # Errors
    ///
    /// Returns a missing-credential [`ConfigError`] when neither source
    /// yields a non-empty value.
    #[instrument(skip(explicit))]
    pub fn resolve(explicit: Option<&str>, env_var: &str) -> Result<Self, ConfigError> {
        if let Some(key) = explicit.map(str::trim).filter(|key| !key.is_empty()) {
            debug!("Using API key from configuration");
            return Ok(Self(key.to_string()));
        }

        match std::env::var(env_var) {
            Ok(key) if !key.trim().is_empty() => {
                debug!("Using API key from environment");
                Ok(Self(key.trim().to_string()))
            }
            _ => Err(ConfigError::missing_credential(env_var)),
        }
    }

    /// The raw key, for building requests.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
