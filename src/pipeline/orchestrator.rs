//! Turn orchestrator: classifies, extracts, and reports at most once.
//!
//! Flow:
//! 1. Classifier → scam verdict
//! 2. Extractor → intelligence record
//! 3. If scam and enough messages exchanged → gate claim
//! 4. Claim won → report handed to the dispatcher (not awaited)

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::HoneypotConfig;
use crate::intel::{extract, is_scam};
use crate::pipeline::types::{ConversationTurn, TurnOutcome};
use crate::report::{ReportDispatcher, ReportPayload, SessionReportGate};

/// Composes detection, the report gate, and the dispatcher per turn.
#[derive(Clone)]
pub struct TurnOrchestrator {
    gate: Arc<SessionReportGate>,
    dispatcher: ReportDispatcher,
    /// Turns with fewer messages exchanged never claim the session.
    report_min_messages: u32,
}

impl TurnOrchestrator {
    pub fn new(gate: Arc<SessionReportGate>, dispatcher: ReportDispatcher) -> Self {
        Self {
            gate,
            dispatcher,
            report_min_messages: 1,
        }
    }

    /// Require at least `min` messages exchanged before a session is reported.
    pub fn with_report_min_messages(mut self, min: u32) -> Self {
        self.report_min_messages = min;
        self
    }

    /// Wire up the production gate and HTTP dispatcher from config.
    pub fn from_config(config: &HoneypotConfig) -> Self {
        Self::new(
            SessionReportGate::with_limit(config.max_tracked_sessions),
            ReportDispatcher::from_config(&config.callback),
        )
        .with_report_min_messages(config.report_min_messages)
    }

    pub fn gate(&self) -> &Arc<SessionReportGate> {
        &self.gate
    }

    /// Process one turn. Never fails; dispatch outcome does not affect the result.
    pub async fn handle_turn(&self, turn: &ConversationTurn) -> TurnOutcome {
        let scam_detected = is_scam(&turn.text);
        let intelligence = extract(&turn.text);

        debug!(
            session_id = %turn.session_id,
            total_messages = turn.total_messages,
            scam_detected,
            artifacts = intelligence.artifact_count(),
            "Turn analysed"
        );

        let mut report_dispatched = false;

        if scam_detected {
            if turn.total_messages < self.report_min_messages {
                debug!(
                    session_id = %turn.session_id,
                    total_messages = turn.total_messages,
                    required = self.report_min_messages,
                    "Not enough engagement yet, deferring report"
                );
            } else if self.gate.try_claim(&turn.session_id).await {
                let payload = ReportPayload::new(
                    turn.session_id.clone(),
                    turn.total_messages,
                    intelligence.clone(),
                );
                info!(
                    session_id = %turn.session_id,
                    total_messages = turn.total_messages,
                    "Scam session claimed, dispatching final report"
                );
                // Detached: delivery runs on its own task.
                let _ = self.dispatcher.dispatch(payload);
                report_dispatched = true;
            }
        }

        TurnOutcome {
            scam_detected,
            intelligence,
            report_dispatched,
        }
    }
}
