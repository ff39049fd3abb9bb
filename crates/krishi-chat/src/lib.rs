//! Conversational core for KrishiMitra.
//!
//! Provides the append-only conversation store, the input modality
//! selector with its exclusive voice channel, and the turn engine that
//! drives one user-submission-to-assistant-reply cycle at a time.

pub mod backend;
pub mod channel;
pub mod engine;
pub mod error;
pub mod speech;
pub mod store;
pub mod types;

pub use backend::AssistantBackend;
pub use channel::{VoiceChannel, VoiceChannelState};
pub use engine::{ConversationEngine, TurnOutcome, TurnState};
pub use error::ChatError;
pub use speech::{SpeechRecognizer, SpeechSynthesizer, UnsupportedRecognizer, UnsupportedSynthesizer};
pub use store::ConversationStore;
pub use types::{Message, Modality, Sender};
