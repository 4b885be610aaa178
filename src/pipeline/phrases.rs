//! Fixed phrase sets for the rewrite/state rules.
//!
//! A rule matches when every phrase in its set occurs somewhere in the
//! lowercased message body — order and contiguity are irrelevant. All
//! phrases here are lowercase for that reason.

/// "You are now in the instanced area Eulmore 2. Current instance can be
/// confirmed at any time using the /instance text command."
pub const INSTANCED_AREA: &[&str] = &["you are now in the instanced area"];

/// "With the chat mode in Say, enter a phrase containing “Capture this.”"
pub const SAY_QUEST_REMINDER: &[&str] = &["with the chat mode in say", "enter a phrase"];

/// "You have received a player commendation!"
pub const PLAYER_COMMENDATION: &[&str] = &["you have received a player commendation"];

/// "The Sunken Temple of Qarn has ended."
pub const DUTY_ENDED: &[&str] = &["has ended"];

/// Guildhest completion lines name the guildhest, not a duty, so the duty
/// name is replaced with a generic label instead of extracted.
pub const GUILDHEST_ENDED: &[&str] = &["guildhest", "has ended"];

/// True when every phrase in `phrases` occurs in `normalized`.
pub fn contains_all(normalized: &str, phrases: &[&str]) -> bool {
    phrases.iter().all(|phrase| normalized.contains(phrase))
}
