//! Read-only domain types: farmer profile, location, and language.
//!
//! The farmer profile is static context carried verbatim into every
//! assistant request. Nothing in the conversational core mutates it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback coordinates used when geolocation is denied or unavailable:
/// Indore, Madhya Pradesh.
pub const INDORE_FALLBACK: (f64, f64) = (22.7196, 75.8577);

/// A resolved geographic position with a human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl Location {
    /// The fixed fallback location (Indore, Madhya Pradesh).
    pub fn fallback() -> Self {
        Self {
            latitude: INDORE_FALLBACK.0,
            longitude: INDORE_FALLBACK.1,
            address: "Indore, Madhya Pradesh".to_string(),
        }
    }
}

/// Soil attributes from the farmer's soil test report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilReport {
    /// Soil classification, e.g. "black loam".
    pub soil_type: String,
    pub ph: f64,
    /// Nitrogen level in kg/ha.
    pub nitrogen: f64,
    /// Phosphorus level in kg/ha.
    pub phosphorus: f64,
    /// Potassium level in kg/ha.
    pub potassium: f64,
}

impl Default for SoilReport {
    fn default() -> Self {
        Self {
            soil_type: "black loam".to_string(),
            ph: 7.2,
            nitrogen: 210.0,
            phosphorus: 18.0,
            potassium: 310.0,
        }
    }
}

/// Static farmer context serialized into every assistant request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmerProfile {
    pub name: String,
    /// Location description, e.g. "Indore, Madhya Pradesh".
    pub location: String,
    pub soil: SoilReport,
    /// Current or planned crop variety.
    pub crop_variety: String,
    /// Total land area in acres.
    pub farm_size_acres: f64,
    /// Irrigation type, e.g. "drip", "canal", "rain-fed".
    pub irrigation: String,
    pub fertilizers: Vec<String>,
    pub pesticides: Vec<String>,
    /// Reference market price note, e.g. "Soybean ₹4500/quintal".
    pub market_price_reference: String,
}

impl Default for FarmerProfile {
    fn default() -> Self {
        Self {
            name: "Ramesh Patel".to_string(),
            location: "Indore, Madhya Pradesh".to_string(),
            soil: SoilReport::default(),
            crop_variety: "Soybean JS-2034".to_string(),
            farm_size_acres: 5.0,
            irrigation: "drip".to_string(),
            fertilizers: vec!["Urea".to_string(), "DAP".to_string()],
            pesticides: vec!["Neem oil".to_string()],
            market_price_reference: "Soybean ₹4500/quintal".to_string(),
        }
    }
}

/// Response languages offered by the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Marathi,
    Gujarati,
    Punjabi,
    Tamil,
    Telugu,
}

impl Language {
    /// All selectable languages, in display order.
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Hindi,
        Language::Marathi,
        Language::Gujarati,
        Language::Punjabi,
        Language::Tamil,
        Language::Telugu,
    ];

    /// BCP-47 language tag, also used to select the synthesis voice locale.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Marathi => "mr-IN",
            Language::Gujarati => "gu-IN",
            Language::Punjabi => "pa-IN",
            Language::Tamil => "ta-IN",
            Language::Telugu => "te-IN",
        }
    }

    /// Native-script label shown in the language selector.
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिंदी (Hindi)",
            Language::Marathi => "मराठी (Marathi)",
            Language::Gujarati => "ગુજરાતી (Gujarati)",
            Language::Punjabi => "ਪੰਜਾਬੀ (Punjabi)",
            Language::Tamil => "தமிழ் (Tamil)",
            Language::Telugu => "తెలుగు (Telugu)",
        }
    }

    /// Parse a language from its lowercase English name.
    pub fn parse(name: &str) -> Option<Language> {
        match name.trim().to_lowercase().as_str() {
            "english" => Some(Language::English),
            "hindi" => Some(Language::Hindi),
            "marathi" => Some(Language::Marathi),
            "gujarati" => Some(Language::Gujarati),
            "punjabi" => Some(Language::Punjabi),
            "tamil" => Some(Language::Tamil),
            "telugu" => Some(Language::Telugu),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Hindi => write!(f, "Hindi"),
            Language::Marathi => write!(f, "Marathi"),
            Language::Gujarati => write!(f, "Gujarati"),
            Language::Punjabi => write!(f, "Punjabi"),
            Language::Tamil => write!(f, "Tamil"),
            Language::Telugu => write!(f, "Telugu"),
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

// =============================================================================
// Tests
// =============================================================================
