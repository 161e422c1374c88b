//! Configuration for the Homebase pipeline and its Google collaborators.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from homebase.toml)
//! - User overrides (~/.config/homebase/homebase.toml, then ./homebase.toml)
//!
//! Credentials are never stored in the struct unless written literally in a
//! file; [`ApiKey::resolve`] reads the named environment variable once, at
//! construction time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credentials;
mod settings;

pub use credentials::ApiKey;
pub use settings::{
    DriveSettings, FileInputSettings, GeminiSettings, HomebaseConfig, PlacesSettings,
    RetrySettings,
};
