//! Turn engine: drives one user-submission-to-assistant-reply cycle.
//!
//! One turn moves through a two-state machine: `Idle` while composing,
//! `AwaitingReply` while exactly one backend call is in flight. Replies
//! route to the transcript or to speech synthesis depending on the
//! modality tagged on the pending request, and the modality resets to
//! text after every completed turn, success or failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use krishi_core::{FarmerProfile, Language};

use crate::backend::AssistantBackend;
use crate::channel::{VoiceChannel, VoiceChannelState};
use crate::error::ChatError;
use crate::speech::{SpeechRecognizer, SpeechSynthesizer};
use crate::store::ConversationStore;
use crate::types::{Message, Modality};

/// Fixed in-character apology appended when the backend call fails.
/// Always routed through the text path; errors are never spoken.
pub const APOLOGY: &str =
    "I am unable to connect to the AI at this moment. Please try again in a little while.";

/// Notice shown when the platform has no speech recognition.
pub const VOICE_UNSUPPORTED_NOTICE: &str =
    "Voice input is not supported on this device. Please use the text input instead.";

/// Where the engine is within the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingReply,
}

/// Result of a completed (or ignored) submission.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Empty or whitespace-only draft; nothing happened.
    Ignored,
    /// Reply appended to the transcript (text modality).
    Replied(String),
    /// Reply spoken aloud, not appended (voice modality).
    Spoken(String),
    /// Backend failed; the fixed apology was appended via the text path.
    Fallback(String),
}

struct EngineState {
    store: ConversationStore,
    draft: String,
    modality: Modality,
    language: Language,
    voice_notice: Option<String>,
}

/// Session-scoped conversation engine.
///
/// Collaborators are injected at construction; the engine holds no
/// implicit global state. All mutation funnels through one internal lock,
/// and the in-flight flag guarantees at most one backend call at a time.
pub struct ConversationEngine {
    state: Mutex<EngineState>,
    in_flight: AtomicBool,
    channel: VoiceChannel,
    backend: Arc<dyn AssistantBackend>,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    profile: FarmerProfile,
}

impl ConversationEngine {
    /// Create an engine seeded with the assistant greeting.
    pub fn new(
        backend: Arc<dyn AssistantBackend>,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        profile: FarmerProfile,
        language: Language,
    ) -> Self {
        Self {
            state: Mutex::new(EngineState {
                store: ConversationStore::new(),
                draft: String::new(),
                modality: Modality::Text,
                language,
                voice_notice: None,
            }),
            in_flight: AtomicBool::new(false),
            channel: VoiceChannel::new(),
            backend,
            recognizer,
            synthesizer,
            profile,
        }
    }

    // -- Draft and modality --

    /// Replace the draft buffer with typed text. Keyboard edits always
    /// tag the pending request as text modality.
    pub fn set_draft(&self, text: &str) {
        let mut s = self.lock_state();
        s.draft = text.to_string();
        s.modality = Modality::Text;
    }

    pub fn draft(&self) -> String {
        self.lock_state().draft.clone()
    }

    /// Modality tagged on the current pending request.
    pub fn modality(&self) -> Modality {
        self.lock_state().modality
    }

    // -- Language selection --

    pub fn set_language(&self, language: Language) {
        self.lock_state().language = language;
    }

    pub fn language(&self) -> Language {
        self.lock_state().language
    }

    // -- Reads --

    /// Ordered snapshot of the conversation log.
    pub fn transcript(&self) -> Vec<Message> {
        self.lock_state().store.all().to_vec()
    }

    pub fn transcript_len(&self) -> usize {
        self.lock_state().store.len()
    }

    pub fn turn_state(&self) -> TurnState {
        if self.in_flight.load(Ordering::SeqCst) {
            TurnState::AwaitingReply
        } else {
            TurnState::Idle
        }
    }

    pub fn is_listening(&self) -> bool {
        self.channel.current() == VoiceChannelState::Capturing
    }

    /// Most recent voice-input notice (capability or capture failure).
    pub fn voice_notice(&self) -> Option<String> {
        self.lock_state().voice_notice.clone()
    }

    /// The exclusive voice channel (capture/synthesis mutual exclusion).
    pub fn voice_channel(&self) -> &VoiceChannel {
        &self.channel
    }

    // -- Voice capture --

    /// Trigger single-utterance voice capture.
    ///
    /// If synthesis is currently playing, it is cancelled and capture is
    /// NOT started; the user must trigger capture again. If the platform
    /// has no recognizer, fails with `CapabilityUnavailable` and sets a
    /// static notice. On a successful transcript the draft buffer is
    /// replaced and the pending request is tagged as voice modality. On a
    /// capture error (e.g. `no-speech`) a notice is recorded and the
    /// transcript is left untouched.
    pub async fn begin_voice_capture(&self) -> Result<(), ChatError> {
        if self.channel.current() == VoiceChannelState::Speaking {
            tracing::debug!("Cancelling active synthesis before capture");
            self.synthesizer.cancel();
            self.channel.transition(VoiceChannelState::Idle)?;
            return Ok(());
        }

        if !self.recognizer.is_available() {
            self.lock_state().voice_notice = Some(VOICE_UNSUPPORTED_NOTICE.to_string());
            return Err(ChatError::CapabilityUnavailable(
                "speech recognition".to_string(),
            ));
        }

        self.channel.transition(VoiceChannelState::Capturing)?;

        let captured = self.recognizer.capture_once().await;
        let _ = self.channel.transition(VoiceChannelState::Idle);

        match captured {
            Ok(transcript) => {
                let mut s = self.lock_state();
                s.draft = transcript;
                s.modality = Modality::Voice;
                s.voice_notice = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Voice capture failed");
                self.lock_state().voice_notice = Some(e.to_string());
                Ok(())
            }
        }
    }

    // -- Turn submission --

    /// Submit the current draft as one turn.
    ///
    /// Empty or whitespace-only drafts are a silent no-op. While a reply
    /// is in flight, further submissions are rejected with `Busy`. On
    /// success the reply routes per the tagged modality; on backend
    /// failure the fixed apology is appended through the text path
    /// regardless of modality.
    pub async fn submit(&self) -> Result<TurnOutcome, ChatError> {
        if self.in_flight.load(Ordering::SeqCst) {
            return Err(ChatError::Busy);
        }

        let (utterance, modality, language) = {
            let s = self.lock_state();
            let utterance = s.draft.trim().to_string();
            if utterance.is_empty() {
                tracing::debug!("Ignoring empty submission");
                return Ok(TurnOutcome::Ignored);
            }
            (utterance, s.modality, s.language)
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ChatError::Busy);
        }

        {
            let mut s = self.lock_state();
            s.store.append_user(utterance.clone());
            s.draft.clear();
        }

        let result = self
            .backend
            .ask(&utterance, language, &self.profile)
            .await;

        let outcome = match result {
            Ok(reply) => self.resolve_output(modality, language, reply).await,
            Err(e) => {
                tracing::warn!(error = %e, "Assistant request failed");
                self.lock_state().store.append_assistant(APOLOGY.to_string());
                TurnOutcome::Fallback(APOLOGY.to_string())
            }
        };

        // Modality resets after every completed turn, success or failure.
        self.lock_state().modality = Modality::Text;
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(outcome)
    }

    /// Route a successful reply per the originating modality.
    async fn resolve_output(
        &self,
        modality: Modality,
        language: Language,
        reply: String,
    ) -> TurnOutcome {
        match modality {
            Modality::Text => {
                self.lock_state().store.append_assistant(reply.clone());
                TurnOutcome::Replied(reply)
            }
            Modality::Voice => {
                // Spoken replies are never appended to the transcript.
                if !self.synthesizer.is_available() {
                    tracing::warn!("Speech synthesis unavailable; dropping spoken reply");
                    return TurnOutcome::Spoken(reply);
                }
                if let Err(e) = self.channel.transition(VoiceChannelState::Speaking) {
                    tracing::warn!(error = %e, "Voice channel busy; dropping spoken reply");
                    return TurnOutcome::Spoken(reply);
                }
                if let Err(e) = self.synthesizer.speak(&reply, language).await {
                    tracing::warn!(error = %e, "Speech synthesis failed");
                }
                let _ = self.channel.transition(VoiceChannelState::Idle);
                TurnOutcome::Spoken(reply)
            }
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, EngineState> {
        self.state.lock().expect("engine state mutex poisoned")
    }
}

// =============================================================================
// Tests
// =============================================================================
