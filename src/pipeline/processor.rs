//! Pipeline orchestrator.
//!
//! `handle` is invoked once per inbound chat line, on whatever thread the
//! host event source uses. It classifies the channel, walks the rewrite/state
//! rule table, then runs the kind-gated spam policies, and returns a verdict.
//! Synchronous and infallible; the only asynchronous effect is the debounced
//! commendation summary.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::chat_type::ChatKind;
use crate::config::FilterConfig;

use super::aggregator::CommendationAggregator;
use super::policies::{SpamPolicies, StandardPolicies};
use super::rules::{self, REWRITE_RULES, RuleAction};
use super::types::{ChatMessage, ChatSink, FilterVerdict};

/// The message filtering pipeline.
///
/// Holds a read-only configuration snapshot, the spam policies, and the
/// commendation aggregator. One instance lives for the whole session.
pub struct ChatPipeline {
    config: FilterConfig,
    policies: Arc<dyn SpamPolicies>,
    aggregator: Arc<CommendationAggregator>,
}

impl ChatPipeline {
    pub fn new(config: FilterConfig, sink: Arc<dyn ChatSink>) -> Self {
        let aggregator = CommendationAggregator::new(sink, config.include_duty_name_in_comms);
        Self {
            config,
            policies: Arc::new(StandardPolicies::new()),
            aggregator,
        }
    }

    /// Build a pipeline with a shortened debounce window (for tests).
    pub fn with_debounce(config: FilterConfig, sink: Arc<dyn ChatSink>, debounce: Duration) -> Self {
        let aggregator = CommendationAggregator::with_debounce(
            sink,
            config.include_duty_name_in_comms,
            debounce,
        );
        Self {
            config,
            policies: Arc::new(StandardPolicies::new()),
            aggregator,
        }
    }

    /// Swap in custom spam policies.
    pub fn with_policies(mut self, policies: Arc<dyn SpamPolicies>) -> Self {
        self.policies = policies;
        self
    }

    /// Pending commendation count (zero outside an accumulation window).
    pub fn pending_commendations(&self) -> u32 {
        self.aggregator.pending()
    }

    /// Decide what to do with one chat line.
    pub fn handle(&self, message: &ChatMessage) -> FilterVerdict {
        let mut verdict = FilterVerdict::pass();
        if !self.config.enabled {
            return verdict;
        }

        let kind = ChatKind::from_code(message.channel_code);
        // Lowercased once; all matching runs against this. Rewrites slice the
        // original body using offsets from the lowercased text, which line up
        // because game text lowercases without shifting byte positions.
        let normalized = message.body.to_lowercase();

        for rule in REWRITE_RULES {
            if !rule.matches(&normalized, kind, &self.config) {
                continue;
            }
            debug!(rule = rule.name, sender = %message.sender, "rule matched");
            match rule.action {
                RuleAction::RewriteInstance => {
                    if let Some(text) = rules::instance_rewrite(&message.body) {
                        verdict.rewritten = Some(text);
                    }
                }
                RuleAction::RewriteSayReminder => {
                    if let Some(text) = rules::say_rewrite(&message.body) {
                        verdict.rewritten = Some(text);
                    }
                }
                RuleAction::CountCommendation => {
                    verdict.handled = true;
                    self.aggregator.record_commendation();
                }
                RuleAction::RecordDutyName => {
                    if let Some(name) = rules::duty_name(&message.body, &normalized) {
                        self.aggregator.record_duty(name);
                    }
                }
                RuleAction::RecordGuildhest => {
                    self.aggregator.record_duty("a Guildhest");
                }
            }
        }

        // Kind-gated spam policies. Each applicable family assigns the
        // handled flag outright, matching the fixed evaluation order above.
        if (kind == ChatKind::StandardEmote && self.config.filter_emote_spam)
            || self.config.hide_used_emotes
        {
            verdict.handled = self.policies.emote_filtered(&normalized, kind, &self.config);
        }
        if kind == ChatKind::CustomEmote {
            verdict.handled = self.policies.emote_filtered(&normalized, kind, &self.config);
        }
        if kind == ChatKind::System && self.config.filter_system_messages {
            verdict.handled = self.policies.system_filtered(&normalized);
        }
        if kind == ChatKind::LootNotice && self.config.filter_obtained_spam {
            verdict.handled = self.policies.obtained_filtered(&normalized);
        }
        if kind == ChatKind::LootRoll && self.config.filter_loot_spam {
            verdict.handled = self.policies.loot_roll_filtered(&normalized);
        }

        if verdict.handled {
            debug!(kind = kind.label(), sender = %message.sender, "message suppressed");
        }
        verdict
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::chat_type::codes;

    #[derive(Default)]
    struct TestSink {
        lines: Mutex<Vec<String>>,
    }

    impl ChatSink for TestSink {
        fn emit(&self, text: &str) {
            self.lines.lock().unwrap().push(text.to_string());
        }
    }

    fn pipeline(config: FilterConfig) -> ChatPipeline {
        ChatPipeline::new(config, Arc::new(TestSink::default()))
    }

    fn system(body: &str) -> ChatMessage {
        ChatMessage::new(codes::SYSTEM, 0, "", body)
    }

    #[test]
    fn disabled_pipeline_is_a_noop() {
        let config = FilterConfig {
            enabled: false,
            filter_system_messages: true,
            ..Default::default()
        };
        let pipeline = pipeline(config);
        let verdict = pipeline.handle(&system(
            "You are now in the instanced area Eulmore 2. Current instance...",
        ));
        assert_eq!(verdict, FilterVerdict::pass());
    }

    #[test]
    fn unmatched_text_passes_through() {
        let pipeline = pipeline(FilterConfig::default());
        let message = ChatMessage::new(codes::SYSTEM, 1, "Alicia", "Hello there!");
        let verdict = pipeline.handle(&message);
        assert_eq!(verdict, FilterVerdict::pass());
        assert_eq!(verdict.display_text(&message.body), Some("Hello there!"));
    }

    #[test]
    fn instance_announcement_rewritten() {
        let pipeline = pipeline(FilterConfig::default());
        let verdict = pipeline.handle(&system(
            "You are now in the instanced area Eulmore 2. Current instance can be \
             confirmed at any time using the /instance text command.",
        ));
        assert!(!verdict.handled);
        assert_eq!(
            verdict.rewritten.as_deref(),
            Some("You are now in instance: 2")
        );
    }

    #[test]
    fn instance_announcement_needs_system_channel() {
        let pipeline = pipeline(FilterConfig::default());
        let message = ChatMessage::new(
            0,
            0,
            "",
            "You are now in the instanced area Eulmore 2. Current instance...",
        );
        assert_eq!(pipeline.handle(&message), FilterVerdict::pass());
    }

    #[test]
    fn say_reminder_rewritten_to_command() {
        let pipeline = pipeline(FilterConfig::default());
        let verdict = pipeline.handle(&system(
            "With the chat mode in Say, enter a phrase containing “Capture this.”",
        ));
        assert_eq!(verdict.rewritten.as_deref(), Some("/say Capture this."));
    }

    #[test]
    fn say_reminder_without_quotes_degrades_to_passthrough() {
        let pipeline = pipeline(FilterConfig::default());
        let verdict = pipeline.handle(&system(
            "With the chat mode in Say, enter a phrase containing the password",
        ));
        assert_eq!(verdict, FilterVerdict::pass());
    }

    #[tokio::test(start_paused = true)]
    async fn commendation_is_suppressed_and_counted() {
        let pipeline = pipeline(FilterConfig::default());
        let verdict = pipeline.handle(&system("You have received a player commendation!"));
        assert!(verdict.handled);
        assert_eq!(pipeline.pending_commendations(), 1);
    }

    #[test]
    fn commendation_toggle_off_passes_through() {
        let config = FilterConfig {
            better_commendation_message: false,
            ..Default::default()
        };
        let pipeline = pipeline(config);
        let verdict = pipeline.handle(&system("You have received a player commendation!"));
        assert!(!verdict.handled);
        assert_eq!(pipeline.pending_commendations(), 0);
    }

    #[test]
    fn duty_ended_is_not_suppressed() {
        let pipeline = pipeline(FilterConfig::default());
        let verdict = pipeline.handle(&system("The Sunken Temple of Qarn has ended."));
        assert!(!verdict.handled);
        assert!(verdict.rewritten.is_none());
    }

    #[test]
    fn system_spam_suppressed_when_enabled() {
        let config = FilterConfig {
            filter_system_messages: true,
            ..Default::default()
        };
        let pipeline = pipeline(config);
        assert!(pipeline.handle(&system("Retainer completed a venture.")).handled);
        assert!(!pipeline.handle(&system("Something informative.")).handled);
    }

    #[test]
    fn loot_notice_spam_suppressed_when_enabled() {
        let config = FilterConfig {
            filter_obtained_spam: true,
            ..Default::default()
        };
        let pipeline = pipeline(config);
        let spam = ChatMessage::new(codes::LOOT_NOTICE, 0, "", "You obtain 1,200 gil.");
        let keep = ChatMessage::new(codes::LOOT_NOTICE, 0, "", "You obtain a Curtana.");
        assert!(pipeline.handle(&spam).handled);
        assert!(!pipeline.handle(&keep).handled);
    }

    #[test]
    fn loot_roll_spam_suppressed_when_enabled() {
        let config = FilterConfig {
            filter_loot_spam: true,
            ..Default::default()
        };
        let pipeline = pipeline(config);
        let spam = ChatMessage::new(codes::LOOT_ROLL, 0, "", "Alicia casts her lot for the Curtana.");
        assert!(pipeline.handle(&spam).handled);
    }

    #[test]
    fn emote_spam_suppressed_when_enabled() {
        let config = FilterConfig {
            filter_emote_spam: true,
            ..Default::default()
        };
        let pipeline = pipeline(config);
        let spam = ChatMessage::new(
            codes::STANDARD_EMOTE,
            0,
            "",
            "Alicia bows courteously to Bertram.",
        );
        let keep = ChatMessage::new(
            codes::STANDARD_EMOTE,
            0,
            "",
            "Alicia bows courteously to you.",
        );
        assert!(pipeline.handle(&spam).handled);
        assert!(!pipeline.handle(&keep).handled);
    }

    #[tokio::test(start_paused = true)]
    async fn later_policy_overwrites_earlier_suppression() {
        // The commendation rule suppresses the line, but with the system
        // filter enabled the system policy re-evaluates the handled flag —
        // evaluation order is fixed and has no early exit.
        let config = FilterConfig {
            filter_system_messages: true,
            ..Default::default()
        };
        let pipeline = pipeline(config);
        let verdict = pipeline.handle(&system("You have received a player commendation!"));
        assert!(!verdict.handled);
        // The count was still recorded before the overwrite.
        assert_eq!(pipeline.pending_commendations(), 1);
    }

    #[test]
    fn custom_policies_are_honored() {
        struct SuppressEverything;
        impl SpamPolicies for SuppressEverything {
            fn emote_filtered(&self, _: &str, _: ChatKind, _: &FilterConfig) -> bool {
                true
            }
            fn system_filtered(&self, _: &str) -> bool {
                true
            }
            fn obtained_filtered(&self, _: &str) -> bool {
                true
            }
            fn loot_roll_filtered(&self, _: &str) -> bool {
                true
            }
        }

        let config = FilterConfig {
            filter_system_messages: true,
            ..Default::default()
        };
        let pipeline = ChatPipeline::new(config, Arc::new(TestSink::default()))
            .with_policies(Arc::new(SuppressEverything));
        assert!(pipeline.handle(&system("anything at all")).handled);
    }
}
