//! Shared foundation for the KrishiMitra assistant.
//!
//! Holds the configuration model, the top-level error type, and the
//! read-only domain types (farmer profile, location, language) consumed
//! by the conversational and gateway crates.

pub mod config;
pub mod error;
pub mod profile;

pub use config::KrishiConfig;
pub use error::{KrishiError, Result};
pub use profile::{FarmerProfile, Language, Location, SoilReport, INDORE_FALLBACK};
