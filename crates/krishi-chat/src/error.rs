//! Error types for the conversational core.

use krishi_core::KrishiError;

/// Errors from the conversation engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("a reply is already in flight")]
    Busy,
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(String),
    #[error("voice channel error: {0}")]
    VoiceChannel(String),
    #[error("recognition error: {0}")]
    Recognition(String),
    #[error("synthesis error: {0}")]
    Synthesis(String),
    #[error("assistant backend error: {0}")]
    Backend(String),
}

impl From<KrishiError> for ChatError {
    fn from(err: KrishiError) -> Self {
        match err {
            KrishiError::CapabilityUnavailable(what) => ChatError::CapabilityUnavailable(what),
            KrishiError::Speech(msg) => ChatError::Recognition(msg),
            other => ChatError::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(
            ChatError::Busy.to_string(),
            "a reply is already in flight"
        );
        assert_eq!(
            ChatError::CapabilityUnavailable("speech recognition".to_string()).to_string(),
            "capability unavailable: speech recognition"
        );
        assert_eq!(
            ChatError::Recognition("no-speech".to_string()).to_string(),
            "recognition error: no-speech"
        );
        assert_eq!(
            ChatError::Backend("status 500".to_string()).to_string(),
            "assistant backend error: status 500"
        );
    }

    #[test]
    fn test_from_krishi_error_capability() {
        let err: ChatError =
            KrishiError::CapabilityUnavailable("geolocation".to_string()).into();
        assert!(matches!(err, ChatError::CapabilityUnavailable(_)));
        assert!(err.to_string().contains("geolocation"));
    }

    #[test]
    fn test_from_krishi_error_speech() {
        let err: ChatError = KrishiError::Speech("engine timeout".to_string()).into();
        assert!(matches!(err, ChatError::Recognition(_)));
    }

    #[test]
    fn test_from_krishi_error_other_maps_to_backend() {
        let err: ChatError = KrishiError::Assistant("connection refused".to_string()).into();
        assert!(matches!(err, ChatError::Backend(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_errors_implement_debug() {
        let dbg = format!("{:?}", ChatError::Busy);
        assert!(dbg.contains("Busy"));
    }
}
