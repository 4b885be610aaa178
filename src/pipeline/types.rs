//! Shared types for the filtering pipeline.

use serde::{Deserialize, Serialize};

/// One inbound chat line, as delivered by the host.
///
/// Immutable — the pipeline never mutates a message in place. Suppression
/// and rewrites are reported through [`FilterVerdict`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Raw channel code (low 7 bits are the channel id, the rest are flags).
    pub channel_code: u16,
    /// Host-assigned sender id.
    pub sender_id: u32,
    /// Sender display name.
    pub sender: String,
    /// Message body.
    pub body: String,
}

impl ChatMessage {
    pub fn new(channel_code: u16, sender_id: u32, sender: &str, body: &str) -> Self {
        Self {
            channel_code,
            sender_id,
            sender: sender.to_string(),
            body: body.to_string(),
        }
    }
}

/// The pipeline's decision for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterVerdict {
    /// True when the host should not display the line.
    pub handled: bool,
    /// Replacement body, when a rewrite rule matched.
    pub rewritten: Option<String>,
}

impl FilterVerdict {
    /// Pass-through verdict: display the line unchanged.
    pub fn pass() -> Self {
        Self::default()
    }

    /// What the host should display for `original`, or `None` if suppressed.
    pub fn display_text<'a>(&'a self, original: &'a str) -> Option<&'a str> {
        if self.handled {
            None
        } else {
            Some(self.rewritten.as_deref().unwrap_or(original))
        }
    }
}

/// Outward emit boundary.
///
/// Used only for the synthesized commendation summary. The host side prints
/// the text into the chat log.
pub trait ChatSink: Send + Sync {
    fn emit(&self, text: &str);
}
