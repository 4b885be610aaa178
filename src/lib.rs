//! Chatsweep — chat-line filtering and rewriting for a game client's text stream.

pub mod chat_type;
pub mod config;
pub mod error;
pub mod pipeline;
