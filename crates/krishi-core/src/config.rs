use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{KrishiError, Result};
use crate::profile::{FarmerProfile, Language};

/// Top-level configuration for the KrishiMitra application.
///
/// Loaded from `~/.krishimitra/config.toml` by default. Each section
/// corresponds to one external collaborator or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KrishiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub profile: FarmerProfile,
}

impl KrishiConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: KrishiConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KrishiError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Default response language for the assistant.
    pub language: Language,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            language: Language::English,
        }
    }
}

/// Generative-language assistant endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the generateContent-style endpoint.
    pub endpoint: String,
    /// Model identifier appended to the endpoint path.
    pub model: String,
    /// API key; the `KRISHI_ASSISTANT_API_KEY` environment variable takes
    /// precedence over this field.
    pub api_key: Option<String>,
    /// Whether to request search augmentation for grounding.
    pub search_augmentation: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: None,
            search_augmentation: true,
        }
    }
}

impl AssistantConfig {
    /// Resolve the API key from the environment, then the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("KRISHI_ASSISTANT_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

/// Weather provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL of the weather provider API.
    pub endpoint: String,
    /// Fixed place name queried for current conditions and forecast.
    pub place: String,
    /// API key; the `KRISHI_WEATHER_API_KEY` environment variable takes
    /// precedence over this field.
    pub api_key: Option<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
            place: "Indore".to_string(),
            api_key: None,
        }
    }
}

impl WeatherConfig {
    /// Resolve the API key from the environment, then the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("KRISHI_WEATHER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

/// Translation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Translation endpoint URL.
    pub endpoint: String,
    /// Source language code assumed for outgoing text.
    pub source: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://libretranslate.de/translate".to_string(),
            source: "en".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
