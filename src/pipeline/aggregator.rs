//! Commendation batching.
//!
//! Commendation notices arrive as a burst of identical lines at the end of a
//! duty. Each one is suppressed and counted; a one-shot debounce timer armed
//! at the first count fires after a quiet period and emits a single summary
//! line. The timer is not re-armed by later counts inside the window.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::types::ChatSink;

/// Quiet period before the summary is emitted. Commendations from one duty
/// all land within a couple of seconds; five is comfortably past that.
pub const COMMENDATION_DEBOUNCE: Duration = Duration::from_secs(5);

#[derive(Default)]
struct AggState {
    commendations: u32,
    last_duty: String,
    timer: Option<JoinHandle<()>>,
}

/// Debounced commendation counter plus the last finished duty's name.
///
/// All state lives behind one mutex shared by the message path and the timer
/// task, so an increment can never race an emission. The timer task holds
/// only a `Weak` reference: dropping the aggregator cancels any pending
/// emission instead of keeping it alive.
pub struct CommendationAggregator {
    state: Mutex<AggState>,
    sink: Arc<dyn ChatSink>,
    debounce: Duration,
    include_duty_name: bool,
    // Handed to the timer task so a pending emission can't outlive us.
    self_weak: Weak<Self>,
}

impl CommendationAggregator {
    pub fn new(sink: Arc<dyn ChatSink>, include_duty_name: bool) -> Arc<Self> {
        Self::with_debounce(sink, include_duty_name, COMMENDATION_DEBOUNCE)
    }

    /// Same as [`new`](Self::new) with a custom quiet period (shortened in
    /// tests).
    pub fn with_debounce(
        sink: Arc<dyn ChatSink>,
        include_duty_name: bool,
        debounce: Duration,
    ) -> Arc<Self> {
        Arc::new_cyclic(|self_weak| Self {
            state: Mutex::new(AggState::default()),
            sink,
            debounce,
            include_duty_name,
            self_weak: self_weak.clone(),
        })
    }

    fn state(&self) -> MutexGuard<'_, AggState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Count one commendation. The first count since the last emission arms
    /// the debounce timer; later counts ride the same window.
    pub fn record_commendation(&self) {
        let mut state = self.state();
        state.commendations += 1;
        debug!(count = state.commendations, "commendation recorded");
        if state.commendations > 1 {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let weak = self.self_weak.clone();
                let debounce = self.debounce;
                state.timer = Some(handle.spawn(async move {
                    tokio::time::sleep(debounce).await;
                    if let Some(aggregator) = weak.upgrade() {
                        aggregator.fire();
                    }
                }));
            }
            Err(_) => {
                // No runtime to defer on: batching degrades to per-message
                // emission.
                warn!("no async runtime available, emitting commendation summary immediately");
                drop(state);
                self.fire();
            }
        }
    }

    /// Remember the finished duty's name. Persists across emissions until
    /// overwritten.
    pub fn record_duty(&self, name: impl Into<String>) {
        let name = name.into();
        debug!(duty = %name, "duty recorded");
        self.state().last_duty = name;
    }

    /// Pending commendation count (zero outside an accumulation window).
    pub fn pending(&self) -> u32 {
        self.state().commendations
    }

    /// Emit the summary and reset the count. No-op when nothing is pending.
    fn fire(&self) {
        let text = {
            let mut state = self.state();
            if state.commendations == 0 {
                return;
            }
            let duty = if self.include_duty_name {
                state.last_duty.as_str()
            } else {
                ""
            };
            let text = summary_text(state.commendations, duty);
            state.commendations = 0;
            state.timer = None;
            text
        };
        // Emit outside the lock; the sink may be arbitrarily slow.
        self.sink.emit(&text);
    }
}

impl Drop for CommendationAggregator {
    fn drop(&mut self) {
        if let Some(timer) = self.state().timer.take() {
            timer.abort();
        }
    }
}

fn summary_text(count: u32, duty: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    if duty.is_empty() {
        format!("You received {count} commendation{plural}.")
    } else {
        format!("You received {count} commendation{plural} from completing {duty}.")
    }
}
