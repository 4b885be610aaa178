//! Channel classification.
//!
//! The host tags every chat line with a raw `u16` channel code. The low 7
//! bits encode the channel identity; the remaining bits are flags (source,
//! target) that are irrelevant to filtering and must be masked off before
//! lookup.

/// Mask that strips flag bits, leaving only the channel identity.
const CHANNEL_MASK: u16 = 0x7F;

/// Raw channel ids as the game client delivers them.
pub mod codes {
    pub const CUSTOM_EMOTE: u16 = 28;
    pub const STANDARD_EMOTE: u16 = 29;
    pub const SYSTEM: u16 = 57;
    pub const LOOT_NOTICE: u16 = 62;
    pub const LOOT_ROLL: u16 = 65;
}

/// Semantic category of a chat channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    System,
    StandardEmote,
    CustomEmote,
    LootNotice,
    LootRoll,
    Other,
}

impl ChatKind {
    /// Classify a raw channel code. Total — unknown ids map to `Other`.
    pub fn from_code(raw: u16) -> Self {
        match raw & CHANNEL_MASK {
            codes::SYSTEM => Self::System,
            codes::STANDARD_EMOTE => Self::StandardEmote,
            codes::CUSTOM_EMOTE => Self::CustomEmote,
            codes::LOOT_NOTICE => Self::LootNotice,
            codes::LOOT_ROLL => Self::LootRoll,
            _ => Self::Other,
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::StandardEmote => "standard_emote",
            Self::CustomEmote => "custom_emote",
            Self::LootNotice => "loot_notice",
            Self::LootRoll => "loot_roll",
            Self::Other => "other",
        }
    }
}
