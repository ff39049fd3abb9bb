//! Speech capture and synthesis seams.
//!
//! The engine never talks to a speech engine directly; it goes through
//! these traits so platforms without the capability (and tests) can inject
//! their own implementations. Availability must be feature-detected via
//! `is_available` before use.

use async_trait::async_trait;
use krishi_core::Language;

use crate::error::ChatError;

/// Single-utterance speech-to-text capture.
///
/// Sessions are non-continuous: one capture yields one transcript or one
/// error (e.g. `no-speech`), then the underlying engine self-terminates.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the platform offers speech recognition at all.
    fn is_available(&self) -> bool;

    /// Capture one utterance and return its transcript.
    async fn capture_once(&self) -> Result<String, ChatError>;
}

/// Text-to-speech playback.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Whether the platform offers speech synthesis at all.
    fn is_available(&self) -> bool;

    /// Speak `text` aloud using the voice locale for `language`.
    async fn speak(&self, text: &str, language: Language) -> Result<(), ChatError>;

    /// Cancel any ongoing playback.
    fn cancel(&self);
}

/// Recognizer for platforms without speech recognition.
#[derive(Debug, Default)]
pub struct UnsupportedRecognizer;

#[async_trait]
impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn capture_once(&self) -> Result<String, ChatError> {
        Err(ChatError::CapabilityUnavailable(
            "speech recognition".to_string(),
        ))
    }
}

/// Synthesizer for platforms without speech synthesis.
#[derive(Debug, Default)]
pub struct UnsupportedSynthesizer;

#[async_trait]
impl SpeechSynthesizer for UnsupportedSynthesizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn speak(&self, _text: &str, _language: Language) -> Result<(), ChatError> {
        Err(ChatError::CapabilityUnavailable(
            "speech synthesis".to_string(),
        ))
    }

    fn cancel(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_recognizer() {
        let rec = UnsupportedRecognizer;
        assert!(!rec.is_available());
        let result = rec.capture_once().await;
        assert!(matches!(result, Err(ChatError::CapabilityUnavailable(_))));
    }

    #[tokio::test]
    async fn test_unsupported_synthesizer() {
        let synth = UnsupportedSynthesizer;
        assert!(!synth.is_available());
        let result = synth.speak("hello", Language::English).await;
        assert!(matches!(result, Err(ChatError::CapabilityUnavailable(_))));
        // cancel on an unavailable engine is a no-op
        synth.cancel();
    }
}
