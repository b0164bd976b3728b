//! Villager conversations and lore text.
//!
//! A [`DialogueService`] produces text; the [`DialogueBridge`] keeps those
//! calls off the simulation thread. [`ScriptedDialogue`] is the built-in
//! offline service.

mod bridge;
mod scripted;
mod service;

pub use bridge::{DialogueBridge, DialogueOutcome};
pub use scripted::ScriptedDialogue;
pub use service::{
    CHAT_FALLBACK, ChatRequest, DialogueError, DialogueReply, DialogueService, LORE_FALLBACK,
    LoreRequest,
};
