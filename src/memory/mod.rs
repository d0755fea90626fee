//! Agent Memory System
//!
//! Per-agent conversation history: an ordered list of user/agent exchanges
//! guarded by a single lock, with turn handles so concurrent turns on the
//! same agent never patch each other's exchange.

pub mod store;

pub use store::{ConversationMemory, Exchange, TurnHandle};
