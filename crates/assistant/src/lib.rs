//! The conversational side of MindNest.
//!
//! [`context`] turns the mood and journal logs into the history text the
//! model sees; [`session`] owns the in-memory transcript and drives one
//! completion exchange per user utterance.

pub mod context;
pub mod session;

pub use context::{AssembledContext, ContextAssembler, PERSONA};
pub use session::{AssistantSession, SessionState};
