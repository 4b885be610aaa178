//! Kind-gated spam suppression policies.
//!
//! These decide whether a line in a noisy channel (emotes, system notices,
//! loot) should be suppressed. They are a trait seam so the orchestrator can
//! be tested with a stub, but the heuristics in [`StandardPolicies`] are the
//! defaults shipped to users.

use regex::Regex;
use tracing::debug;

use crate::chat_type::ChatKind;
use crate::config::FilterConfig;

/// Suppression decisions for the spam rule families.
///
/// Every method takes the lowercased message body and returns true when the
/// line should be hidden.
pub trait SpamPolicies: Send + Sync {
    /// Standard/custom emote lines, plus the used-emote check.
    fn emote_filtered(&self, normalized: &str, kind: ChatKind, config: &FilterConfig) -> bool;
    /// Known-noisy system messages.
    fn system_filtered(&self, normalized: &str) -> bool;
    /// Routine obtained-item notices.
    fn obtained_filtered(&self, normalized: &str) -> bool;
    /// Loot-roll chatter.
    fn loot_roll_filtered(&self, normalized: &str) -> bool;
}

/// System lines that carry no information the player acts on.
const SYSTEM_SPAM: &[&str] = &[
    "you sense the presence of a powerful mark",
    "retainer completed a venture",
    "you have arrived at a vista",
    "your spiritbond with",
    "gearset changed to",
];

/// Default heuristics.
pub struct StandardPolicies {
    obtained: Regex,
    loot_roll: Regex,
}

impl StandardPolicies {
    pub fn new() -> Self {
        // Patterns match lowercased text, so no (?i) needed.
        Self {
            obtained: Regex::new(
                r"^you obtain (?:\d[\d,]* gil|.+ (?:shards?|crystals?|clusters?)|\d+ .*seals)",
            )
            .unwrap(),
            loot_roll: Regex::new(
                r"casts (?:his|her|their) lot|you cast your lot|rolls? (?:need|greed)",
            )
            .unwrap(),
        }
    }
}

impl Default for StandardPolicies {
    fn default() -> Self {
        Self::new()
    }
}

impl SpamPolicies for StandardPolicies {
    fn emote_filtered(&self, normalized: &str, kind: ChatKind, config: &FilterConfig) -> bool {
        // Emotes the player performed start with "you " ("You bow...").
        if config.hide_used_emotes && normalized.starts_with("you ") {
            debug!(kind = kind.label(), "suppressing used emote");
            return true;
        }
        // Spam filtering keeps emotes that involve the player and drops the
        // rest of the crowd noise.
        match kind {
            ChatKind::StandardEmote | ChatKind::CustomEmote => {
                config.filter_emote_spam && !normalized.contains("you")
            }
            _ => false,
        }
    }

    fn system_filtered(&self, normalized: &str) -> bool {
        SYSTEM_SPAM.iter().any(|spam| normalized.contains(spam))
    }

    fn obtained_filtered(&self, normalized: &str) -> bool {
        self.obtained.is_match(normalized)
    }

    fn loot_roll_filtered(&self, normalized: &str) -> bool {
        self.loot_roll.is_match(normalized)
    }
}
