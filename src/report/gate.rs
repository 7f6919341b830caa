//! At-most-once report claim per conversation.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

/// Tracks which conversations have already triggered their report.
///
/// `try_claim` is a test-and-set: membership check and insert happen under one
/// lock, so concurrent turns for the same session can never both win.
pub struct SessionReportGate {
    inner: Mutex<GateState>,
    max_tracked: Option<usize>,
}

#[derive(Default)]
struct GateState {
    claimed: HashSet<String>,
    /// Claim order, only maintained when a bound is configured.
    order: VecDeque<String>,
}

impl SessionReportGate {
    /// Create an unbounded gate. Claims are remembered for the life of the process.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(GateState::default()),
            max_tracked: None,
        })
    }

    /// Create a gate that forgets its oldest claims beyond `max_tracked` sessions.
    ///
    /// An evicted session can be claimed again, so this trades the
    /// one-report-per-session guarantee for bounded memory.
    pub fn bounded(max_tracked: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(GateState::default()),
            max_tracked: Some(max_tracked.max(1)),
        })
    }

    /// Build from an optional bound (as loaded from config).
    pub fn with_limit(max_tracked: Option<usize>) -> Arc<Self> {
        match max_tracked {
            Some(bound) => Self::bounded(bound),
            None => Self::new(),
        }
    }

    /// Atomically claim the session. Returns true only for the first caller.
    pub async fn try_claim(&self, session_id: &str) -> bool {
        let mut state = self.inner.lock().await;

        if !state.claimed.insert(session_id.to_string()) {
            debug!(session_id = %session_id, "Session already reported");
            return false;
        }

        if let Some(max) = self.max_tracked {
            state.order.push_back(session_id.to_string());
            while state.order.len() > max {
                if let Some(evicted) = state.order.pop_front() {
                    state.claimed.remove(&evicted);
                    debug!(session_id = %evicted, "Evicted oldest claimed session");
                }
            }
        }

        debug!(session_id = %session_id, "Session claimed for reporting");
        true
    }

    /// Whether the session has been claimed (and not evicted).
    pub async fn is_claimed(&self, session_id: &str) -> bool {
        self.inner.lock().await.claimed.contains(session_id)
    }

    /// Number of sessions currently remembered.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.claimed.len()
    }

    /// Check if no session has been claimed.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.claimed.is_empty()
    }
}
