//! Shared types for the turn pipeline.

use serde::{Deserialize, Serialize};

use crate::intel::IntelligenceRecord;

// ── Inbound turn ────────────────────────────────────────────────────

/// One inbound message of a conversation.
///
/// Built by the transport layer per request; never persisted. The session id
/// is opaque and the text is untrusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Stable identifier shared by every turn of the conversation.
    pub session_id: String,
    /// Latest message text (may be empty).
    pub text: String,
    /// Messages exchanged so far, including this one.
    pub total_messages: u32,
}

impl ConversationTurn {
    pub fn new(session_id: impl Into<String>, text: impl Into<String>, total_messages: u32) -> Self {
        Self {
            session_id: session_id.into(),
            text: text.into(),
            total_messages,
        }
    }
}

// ── Outcome ─────────────────────────────────────────────────────────

/// What the pipeline concluded about a turn.
///
/// `scam_detected` and `intelligence` are computed independently of whether
/// a report was sent or delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub scam_detected: bool,
    pub intelligence: IntelligenceRecord,
    /// True only for the turn that won the session's report claim.
    pub report_dispatched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_construction() {
        let turn = ConversationTurn::new("s-1", "hello", 1);
        assert_eq!(turn.session_id, "s-1");
        assert_eq!(turn.text, "hello");
        assert_eq!(turn.total_messages, 1);
    }

    #[test]
    fn turn_allows_empty_text() {
        let turn = ConversationTurn::new("s-2", "", 3);
        assert!(turn.text.is_empty());
    }
}
