//! System-instruction template for the assistant request.

use krishi_core::{FarmerProfile, Language};

/// Compose the fixed system instruction carried on every turn: persona,
/// capability description, serialized farmer profile, and the target
/// response language.
pub fn build_system_instruction(profile: &FarmerProfile, language: Language) -> String {
    let profile_json =
        serde_json::to_string_pretty(profile).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are Krishi Sahayak, a friendly farming assistant for Indian farmers. \
You help with farming questions, crop advice, weather guidance, market prices, \
and plant disease concerns. Keep answers practical, specific to the farmer's \
situation, and easy to understand.\n\n\
Farmer profile:\n{profile_json}\n\n\
Respond in {language}."
    )
}
