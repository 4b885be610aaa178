//! Declarative rewrite/state rule table.
//!
//! Each rule is a fixed phrase set, an optional required channel kind, a
//! config gate, and an action tag. The orchestrator walks [`REWRITE_RULES`]
//! in order and applies every rule that matches — there is no early exit.
//!
//! Extraction helpers return `Option`: when the expected punctuation is
//! missing the rewrite is skipped and the line passes through unchanged.

use crate::chat_type::ChatKind;
use crate::config::FilterConfig;

use super::phrases;

/// What a matched rule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Rewrite the instanced-area announcement to `You are now in instance: N`.
    RewriteInstance,
    /// Rewrite the say-quest reminder to a `/say <phrase>` command.
    RewriteSayReminder,
    /// Suppress the line and count it toward the debounced summary.
    CountCommendation,
    /// Remember the finished duty's name for the next summary.
    RecordDutyName,
    /// Remember a generic guildhest label for the next summary.
    RecordGuildhest,
}

/// One entry in the rule table.
pub struct RewriteRule {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
    /// Required channel kind, or `None` for any.
    pub kind: Option<ChatKind>,
    pub gate: fn(&FilterConfig) -> bool,
    pub action: RuleAction,
}

impl RewriteRule {
    /// Whether this rule applies to a message with the given lowercased body.
    pub fn matches(&self, normalized: &str, kind: ChatKind, config: &FilterConfig) -> bool {
        (self.gate)(config)
            && self.kind.is_none_or(|required| required == kind)
            && phrases::contains_all(normalized, self.phrases)
    }
}

fn gate_instance(config: &FilterConfig) -> bool {
    config.better_instance_message
}

fn gate_say_reminder(config: &FilterConfig) -> bool {
    config.better_say_reminder && !config.hide_quest_reminder
}

fn gate_commendation(config: &FilterConfig) -> bool {
    config.better_commendation_message
}

/// The rule table, in evaluation order.
pub const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule {
        name: "instance_announcement",
        phrases: phrases::INSTANCED_AREA,
        kind: Some(ChatKind::System),
        gate: gate_instance,
        action: RuleAction::RewriteInstance,
    },
    RewriteRule {
        name: "say_reminder",
        phrases: phrases::SAY_QUEST_REMINDER,
        kind: Some(ChatKind::System),
        gate: gate_say_reminder,
        action: RuleAction::RewriteSayReminder,
    },
    RewriteRule {
        name: "commendation_received",
        phrases: phrases::PLAYER_COMMENDATION,
        kind: None,
        gate: gate_commendation,
        action: RuleAction::CountCommendation,
    },
    RewriteRule {
        name: "duty_ended",
        phrases: phrases::DUTY_ENDED,
        kind: None,
        gate: gate_commendation,
        action: RuleAction::RecordDutyName,
    },
    RewriteRule {
        name: "guildhest_ended",
        phrases: phrases::GUILDHEST_ENDED,
        kind: None,
        gate: gate_commendation,
        action: RuleAction::RecordGuildhest,
    },
];

// ── Extraction helpers ──────────────────────────────────────────────

const QUOTE_MARKS: &[char] = &['“', '”', '"'];

/// Extract the instance digit and build the replacement line.
///
/// The first sentence of the announcement ends with the instance number:
/// `You are now in the instanced area Eulmore 2. Current instance can be...`
/// The character immediately before the first period is the digit.
pub fn instance_rewrite(body: &str) -> Option<String> {
    let period = body.find('.')?;
    let digit = body[..period].chars().next_back()?;
    if !digit.is_ascii_digit() {
        return None;
    }
    Some(format!("You are now in instance: {digit}"))
}

/// Extract the quoted phrase from a say-quest reminder and build a `/say`
/// command. The phrase sits between the first and last quotation marks
/// (smart quotes in real game text; straight quotes accepted too).
pub fn say_rewrite(body: &str) -> Option<String> {
    let open = body.find(QUOTE_MARKS)?;
    let close = body.rfind(QUOTE_MARKS)?;
    let open_end = open + body[open..].chars().next()?.len_utf8();
    if close <= open_end {
        return None;
    }
    let phrase = &body[open_end..close];
    Some(format!("/say {phrase}"))
}

/// Extract the duty name from `<duty> has ended.`.
///
/// Searches for the literal trailing phrase rather than relying on a fixed
/// offset from the last space, so longer or shorter tails don't break it.
/// `end` comes from the lowercased text; positions match the original body
/// because game text lowercases without shifting byte offsets.
pub fn duty_name(body: &str, normalized: &str) -> Option<String> {
    let end = normalized.find(" has ended")?;
    if end == 0 || !body.is_char_boundary(end) {
        return None;
    }
    Some(body[..end].to_string())
}
