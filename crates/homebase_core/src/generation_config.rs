//! Sampling and safety configuration for generation requests.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Provider-side content filter threshold.
///
/// Serialized with the provider's wire names.
///
/// # Examples
///
/// ```
/// use homebase_core::SafetyThreshold;
/// use std::str::FromStr;
///
/// assert_eq!(SafetyThreshold::BlockNone.to_string(), "BLOCK_NONE");
/// assert_eq!(
///     SafetyThreshold::from_str("BLOCK_ONLY_HIGH").unwrap(),
///     SafetyThreshold::BlockOnlyHigh
/// );
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyThreshold {
    /// Never block.
    #[default]
    BlockNone,
    /// Block only high-probability harmful content.
    BlockOnlyHigh,
    /// Block medium and high probability.
    BlockMediumAndAbove,
    /// Block low, medium and high probability.
    BlockLowAndAbove,
}

/// Harm category the safety threshold applies to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    /// Dangerous content.
    #[default]
    HarmCategoryDangerousContent,
    /// Harassment.
    HarmCategoryHarassment,
    /// Hate speech.
    HarmCategoryHateSpeech,
    /// Sexually explicit content.
    HarmCategorySexuallyExplicit,
}

/// Sampling parameters and safety policy for one generation request.
///
/// # Examples
///
/// ```
/// use homebase_core::{GenerationConfig, SafetyThreshold};
///
/// let config = GenerationConfig::builder()
///     .temperature(0.4)
///     .top_p(0.9)
///     .build()
///     .unwrap();
/// assert_eq!(*config.top_k(), 0);
/// assert_eq!(*config.safety_threshold(), SafetyThreshold::BlockNone);
///
/// assert!(GenerationConfig::builder().temperature(2.5).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(try_from = "RawGenerationConfig")]
pub struct GenerationConfig {
    /// Sampling temperature in `[0, 2]`.
    #[builder(default = "1.0")]
    temperature: f32,
    /// Nucleus sampling mass in `[0, 1]`.
    #[builder(default = "0.95")]
    top_p: f32,
    /// Top-k cutoff; `0` leaves it to the provider.
    #[builder(default)]
    top_k: u32,
    /// Content filter threshold.
    #[builder(default)]
    safety_threshold: SafetyThreshold,
    /// Category the threshold applies to.
    #[builder(default)]
    harm_category: HarmCategory,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 0,
            safety_threshold: SafetyThreshold::BlockNone,
            harm_category: HarmCategory::HarmCategoryDangerousContent,
        }
    }
}

impl GenerationConfig {
    /// Creates a new config builder.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Checks that every sampling parameter is inside its documented range.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), String> {
        check_temperature(self.temperature)?;
        check_top_p(self.top_p)
    }
}

/// Unchecked wire form; converted through [`GenerationConfig::validate`].
#[derive(Deserialize)]
struct RawGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    safety_threshold: SafetyThreshold,
    harm_category: HarmCategory,
}

impl TryFrom<RawGenerationConfig> for GenerationConfig {
    type Error = String;

    fn try_from(raw: RawGenerationConfig) -> Result<Self, Self::Error> {
        let config = Self {
            temperature: raw.temperature,
            top_p: raw.top_p,
            top_k: raw.top_k,
            safety_threshold: raw.safety_threshold,
            harm_category: raw.harm_category,
        };
        config.validate()?;
        Ok(config)
    }
}

impl GenerationConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(temperature) = self.temperature {
            check_temperature(temperature)?;
        }
        if let Some(top_p) = self.top_p {
            check_top_p(top_p)?;
        }
        Ok(())
    }
}

fn check_temperature(temperature: f32) -> Result<(), String> {
    if !(0.0..=2.0).contains(&temperature) {
        return Err(format!(
            "temperature must be in [0.0, 2.0], got {}",
            temperature
        ));
    }
    Ok(())
}

fn check_top_p(top_p: f32) -> Result<(), String> {
    if !(0.0..=1.0).contains(&top_p) {
        return Err(format!("top_p must be in [0.0, 1.0], got {}", top_p));
    }
    Ok(())
}
