//! Assistant backend seam.
//!
//! The gateway crate provides the real generative-language implementation;
//! tests inject mocks. The backend is stateless between calls: every call
//! is independently parameterized with the utterance, language, and
//! farmer profile.

use async_trait::async_trait;
use krishi_core::{FarmerProfile, Language, Result};

/// One external request per user turn to the generative-language provider.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Ask the assistant one question and return the reply text.
    ///
    /// The implementation composes the persona, the serialized farmer
    /// profile, and the target response language around `utterance`.
    /// At most one attempt is made; no retry, no caching.
    async fn ask(
        &self,
        utterance: &str,
        language: Language,
        profile: &FarmerProfile,
    ) -> Result<String>;
}
