//! Message filtering pipeline.
//!
//! Every inbound chat line flows through:
//! 1. `ChatKind::from_code()` — channel classification
//! 2. the rewrite/state rule table (`rules`) — config-gated phrase rules
//! 3. the spam policies (`policies`) — kind-gated suppression heuristics
//!
//! Rules run in a fixed order with no early exit: a later rule still runs
//! after an earlier one rewrote or suppressed the line. Commendation notices
//! are suppressed individually and re-emitted as one debounced summary by
//! `aggregator`.

pub mod aggregator;
pub mod phrases;
pub mod policies;
pub mod processor;
pub mod rules;
pub mod types;

pub use aggregator::{COMMENDATION_DEBOUNCE, CommendationAggregator};
pub use processor::ChatPipeline;
pub use types::{ChatMessage, ChatSink, FilterVerdict};
