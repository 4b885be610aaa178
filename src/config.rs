//! Filter configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// User-facing filter toggles.
///
/// Loaded once at startup and read (never mutated) by the pipeline on every
/// message. Defaults lean toward the rewrite rules being on and the blanket
/// spam filters being off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Master switch. When false, every message passes through untouched.
    pub enabled: bool,
    /// Rewrite the instanced-area announcement to a one-liner.
    pub better_instance_message: bool,
    /// Rewrite the say-quest reminder into a ready-to-paste `/say` command.
    pub better_say_reminder: bool,
    /// Drop the say-quest reminder entirely (wins over the rewrite).
    pub hide_quest_reminder: bool,
    /// Batch commendation notices into one summary line.
    pub better_commendation_message: bool,
    /// Append the completed duty's name to the commendation summary.
    pub include_duty_name_in_comms: bool,
    /// Suppress standard emote lines that don't involve the player.
    pub filter_emote_spam: bool,
    /// Suppress emote lines the player performed themselves.
    pub hide_used_emotes: bool,
    /// Suppress known-noisy system messages.
    pub filter_system_messages: bool,
    /// Suppress routine obtained-item notices (gil, shards, seals).
    pub filter_obtained_spam: bool,
    /// Suppress loot-roll chatter.
    pub filter_loot_spam: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            better_instance_message: true,
            better_say_reminder: true,
            hide_quest_reminder: false,
            better_commendation_message: true,
            include_duty_name_in_comms: true,
            filter_emote_spam: false,
            hide_used_emotes: false,
            filter_system_messages: false,
            filter_obtained_spam: false,
            filter_loot_spam: false,
        }
    }
}

impl FilterConfig {
    /// Load toggles from `CHATSWEEP_*` environment variables, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            enabled: env_flag("CHATSWEEP_ENABLED", defaults.enabled)?,
            better_instance_message: env_flag(
                "CHATSWEEP_BETTER_INSTANCE_MESSAGE",
                defaults.better_instance_message,
            )?,
            better_say_reminder: env_flag(
                "CHATSWEEP_BETTER_SAY_REMINDER",
                defaults.better_say_reminder,
            )?,
            hide_quest_reminder: env_flag(
                "CHATSWEEP_HIDE_QUEST_REMINDER",
                defaults.hide_quest_reminder,
            )?,
            better_commendation_message: env_flag(
                "CHATSWEEP_BETTER_COMMENDATION_MESSAGE",
                defaults.better_commendation_message,
            )?,
            include_duty_name_in_comms: env_flag(
                "CHATSWEEP_INCLUDE_DUTY_NAME_IN_COMMS",
                defaults.include_duty_name_in_comms,
            )?,
            filter_emote_spam: env_flag("CHATSWEEP_FILTER_EMOTE_SPAM", defaults.filter_emote_spam)?,
            hide_used_emotes: env_flag("CHATSWEEP_HIDE_USED_EMOTES", defaults.hide_used_emotes)?,
            filter_system_messages: env_flag(
                "CHATSWEEP_FILTER_SYSTEM_MESSAGES",
                defaults.filter_system_messages,
            )?,
            filter_obtained_spam: env_flag(
                "CHATSWEEP_FILTER_OBTAINED_SPAM",
                defaults.filter_obtained_spam,
            )?,
            filter_loot_spam: env_flag("CHATSWEEP_FILTER_LOOT_SPAM", defaults.filter_loot_spam)?,
        })
    }
}

/// Parse a boolean flag from the environment. Unset → `default`.
fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(value) => parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {value:?}"),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
