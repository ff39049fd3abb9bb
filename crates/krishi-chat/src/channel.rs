//! Exclusive voice channel with guarded state transitions.
//!
//! Speech capture and speech synthesis share one channel and are mutually
//! exclusive. Valid transitions:
//! - Idle -> Capturing (start a single-utterance capture)
//! - Capturing -> Idle (transcript, error, or cancel)
//! - Idle -> Speaking (start synthesis playback)
//! - Speaking -> Idle (playback finished or cancelled)

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::ChatError;

/// Operational state of the voice channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceChannelState {
    /// Channel free. Ready to capture or speak.
    Idle,
    /// Listening for one spoken utterance via the microphone.
    Capturing,
    /// Speaking a reply through the synthesis engine.
    Speaking,
}

impl fmt::Display for VoiceChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceChannelState::Idle => write!(f, "Idle"),
            VoiceChannelState::Capturing => write!(f, "Capturing"),
            VoiceChannelState::Speaking => write!(f, "Speaking"),
        }
    }
}

impl VoiceChannelState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &VoiceChannelState) -> bool {
        matches!(
            (self, target),
            (VoiceChannelState::Idle, VoiceChannelState::Capturing)
                | (VoiceChannelState::Idle, VoiceChannelState::Speaking)
                | (VoiceChannelState::Capturing, VoiceChannelState::Idle)
                | (VoiceChannelState::Speaking, VoiceChannelState::Idle)
        )
    }
}

/// Thread-safe state machine for the exclusive voice channel.
///
/// All transitions are validated before being applied, returning an error
/// if the requested transition is not permitted from the current state.
#[derive(Debug, Clone)]
pub struct VoiceChannel {
    state: Arc<Mutex<VoiceChannelState>>,
}

impl Default for VoiceChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceChannel {
    /// Create a new channel initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(VoiceChannelState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> VoiceChannelState {
        *self.state.lock().expect("voice channel mutex poisoned")
    }

    /// Attempt to transition to the target state.
    pub fn transition(&self, target: VoiceChannelState) -> Result<(), ChatError> {
        let mut state = self.state.lock().expect("voice channel mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Voice channel: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(ChatError::VoiceChannel(format!(
                "invalid transition: {} -> {}",
                *state, target
            )))
        }
    }

}

// =============================================================================
// Tests
// =============================================================================
