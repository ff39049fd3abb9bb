//! External collaborators for KrishiMitra.
//!
//! Thin request/response bridges to the generative-language provider, the
//! weather provider, the translation endpoint, and the platform
//! geolocation capability. All calls are plain HTTPS with JSON bodies;
//! failures are normalized into local fallback content at the call site.

pub mod assistant;
pub mod geolocate;
pub mod prompt;
pub mod translate;
pub mod weather;

pub use assistant::{GenerativeAssistant, PROCESSING_FALLBACK};
pub use geolocate::{resolve_or_fallback, Geolocator, UnavailableGeolocator};
pub use prompt::build_system_instruction;
pub use translate::Translator;
pub use weather::{CurrentWeather, DailyForecast, WeatherAdvisory, WeatherClient};
