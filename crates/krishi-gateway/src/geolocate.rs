//! Geolocation resolution with a fixed fallback.
//!
//! Single-shot position lookup. Denial, error, or an absent capability
//! all resolve to the Indore fallback location; callers never see an
//! error state.

use async_trait::async_trait;
use tracing::debug;

use krishi_core::{KrishiError, Location};

/// Single-shot platform position provider.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Request the current position once.
    async fn current_position(&self) -> Result<(f64, f64), KrishiError>;
}

/// Geolocator for platforms without the capability.
#[derive(Debug, Default)]
pub struct UnavailableGeolocator;

#[async_trait]
impl Geolocator for UnavailableGeolocator {
    async fn current_position(&self) -> Result<(f64, f64), KrishiError> {
        Err(KrishiError::CapabilityUnavailable(
            "geolocation".to_string(),
        ))
    }
}

/// Resolve the current location, falling back to Indore on any failure.
pub async fn resolve_or_fallback(geolocator: &dyn Geolocator) -> Location {
    match geolocator.current_position().await {
        Ok((latitude, longitude)) => Location {
            latitude,
            longitude,
            address: "Current Location".to_string(),
        },
        Err(cause) => {
            debug!(%cause, "Geolocation unavailable; using fallback location");
            Location::fallback()
        }
    }
}
