//! Application context: explicit dependency wiring.
//!
//! Every collaborator is constructed here once at startup and handed to
//! the code that needs it. Nothing reaches through a global.

use std::sync::Arc;

use krishi_chat::{ConversationEngine, UnsupportedRecognizer, UnsupportedSynthesizer};
use krishi_core::{KrishiConfig, Location};
use krishi_gateway::{
    resolve_or_fallback, GenerativeAssistant, Translator, UnavailableGeolocator, WeatherClient,
};

/// Dependency-injected application context.
pub struct AppContext {
    pub config: KrishiConfig,
    pub engine: ConversationEngine,
    pub weather: WeatherClient,
    pub translator: Translator,
    pub location: Location,
}

impl AppContext {
    /// Build the context from loaded configuration.
    ///
    /// The terminal build has no platform speech engines, so the engine
    /// gets the unsupported recognizer/synthesizer: voice capture surfaces
    /// the static notice and replies always take the text path.
    pub async fn build(config: KrishiConfig) -> Self {
        let backend = Arc::new(GenerativeAssistant::new(config.assistant.clone()));
        let engine = ConversationEngine::new(
            backend,
            Arc::new(UnsupportedRecognizer),
            Arc::new(UnsupportedSynthesizer),
            config.profile.clone(),
            config.general.language,
        );

        let weather = WeatherClient::new(config.weather.clone());
        let translator = Translator::new(config.translation.clone());
        let location = resolve_or_fallback(&UnavailableGeolocator).await;

        Self {
            config,
            engine,
            weather,
            translator,
            location,
        }
    }
}
