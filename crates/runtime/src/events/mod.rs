//! Topic-based event bus for runtime events.
//!
//! Engine events are routed onto one of five topics; runtime services
//! (persistence, dialogue) publish their own events next to them.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{DialogueEvent, PlayerEvent, ProgressEvent, SessionEvent, WorldEvent, route};
